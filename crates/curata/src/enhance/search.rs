//! Web search collaborators for supporting-detail gaps.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::error::{CurataError, Result};

/// One search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub snippet: String,
}

/// A web search backend.
///
/// Implementations must be thread-safe (Send + Sync).
pub trait SearchProvider: Send + Sync {
    /// Up to `limit` results for `query`.
    fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>>;

    /// Provider name for logs and reports.
    fn name(&self) -> &str;
}

/// SearXNG instance queried through its JSON API.
///
/// The instance must have the `json` format enabled in its settings.
pub struct SearxngProvider {
    client: Client,
    base_url: String,
}

impl SearxngProvider {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .map_err(|e| CurataError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn error(&self, message: impl Into<String>) -> CurataError {
        CurataError::provider("searxng", message)
    }
}

impl SearchProvider for SearxngProvider {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("q", query), ("format", "json")])
            .send()
            .map_err(|e| self.error(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(self.error(format!("HTTP {}", status)));
        }

        let parsed: SearxngResponse = response
            .json()
            .map_err(|e| self.error(format!("Failed to parse response: {}", e)))?;

        Ok(parsed
            .results
            .into_iter()
            .filter(|r| !r.url.is_empty())
            .take(limit)
            .map(|r| SearchResult {
                title: r.title,
                url: r.url,
                snippet: r.content,
            })
            .collect())
    }

    fn name(&self) -> &str {
        "searxng"
    }
}

#[derive(Debug, Deserialize)]
struct SearxngResponse {
    #[serde(default)]
    results: Vec<SearxngResult>,
}

#[derive(Debug, Deserialize)]
struct SearxngResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

/// Search provider returning canned results.
#[derive(Debug, Clone, Default)]
pub struct MockSearchProvider {
    results: Vec<SearchResult>,
    fail: bool,
}

impl MockSearchProvider {
    pub fn new(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            fail: false,
        }
    }

    /// A provider whose every call errors.
    pub fn failing() -> Self {
        Self {
            results: Vec::new(),
            fail: true,
        }
    }
}

impl SearchProvider for MockSearchProvider {
    fn search(&self, _query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        if self.fail {
            return Err(CurataError::provider("mock-search", "simulated search failure"));
        }
        Ok(self.results.iter().take(limit).cloned().collect())
    }

    fn name(&self) -> &str {
        "mock-search"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(n: usize) -> SearchResult {
        SearchResult {
            title: format!("Result {}", n),
            url: format!("https://example.com/{}", n),
            snippet: "snippet".to_string(),
        }
    }

    #[test]
    fn test_mock_respects_limit() {
        let mock = MockSearchProvider::new((0..5).map(hit).collect());
        assert_eq!(mock.search("q", 3).unwrap().len(), 3);
    }

    #[test]
    fn test_failing_mock() {
        assert!(MockSearchProvider::failing().search("q", 3).is_err());
    }

    #[test]
    fn test_parse_searxng_response() {
        let raw = r#"{"query": "tea", "results": [
            {"title": "Tea", "url": "https://tea.example", "content": "All about tea", "engine": "ddg"},
            {"title": "No url"}
        ]}"#;
        let parsed: SearxngResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].content, "All about tea");
    }

    #[test]
    fn test_unreachable_instance_errors() {
        let provider = SearxngProvider::new("http://127.0.0.1:9/").unwrap();
        assert_eq!(provider.base_url, "http://127.0.0.1:9");
        let err = provider.search("tea", 3).unwrap_err();
        assert!(matches!(err, CurataError::Provider { .. }));
    }
}
