//! Anthropic Claude API provider implementation.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::json;

use crate::error::{CurataError, Result};

use super::prompts;
use super::provider::{
    GeneratedSections, GenerationRequest, LlmConfig, LlmProvider, parse_json_response,
};

/// Anthropic API endpoint.
const API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Anthropic API version.
const API_VERSION: &str = "2023-06-01";

/// Anthropic Claude provider.
pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    config: LlmConfig,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, LlmConfig::default())
    }

    /// Create a new Anthropic provider with custom configuration.
    pub fn with_config(api_key: impl Into<String>, config: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| {
                CurataError::Config(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            config,
        })
    }

    /// Create from environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
            CurataError::Config("ANTHROPIC_API_KEY environment variable not set".to_string())
        })?;
        Self::new(api_key)
    }

    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&self.api_key)
                .map_err(|e| CurataError::Config(format!("Invalid API key: {}", e)))?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static(API_VERSION));
        Ok(headers)
    }

    /// Send a message to the Claude API.
    fn send_message(&self, user_prompt: &str) -> Result<String> {
        let body = json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "system": prompts::system_prompt(),
            "messages": [
                {
                    "role": "user",
                    "content": user_prompt
                }
            ]
        });

        let response = self
            .client
            .post(API_URL)
            .headers(self.build_headers()?)
            .json(&body)
            .send()
            .map_err(|e| CurataError::provider("anthropic", format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            return Err(CurataError::provider(
                "anthropic",
                format!("API error ({}): {}", status, error_text),
            ));
        }

        let api_response: ApiResponse = response.json().map_err(|e| {
            CurataError::provider("anthropic", format!("failed to parse response: {}", e))
        })?;

        api_response.text()
    }
}

impl LlmProvider for AnthropicProvider {
    fn generate_enhancement(&self, request: &GenerationRequest) -> Result<GeneratedSections> {
        let prompt = prompts::enhancement_prompt(request);
        let response = self.send_message(&prompt)?;
        parse_json_response(self.name(), &response)
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}

/// Anthropic API response structure.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
}

impl ApiResponse {
    /// First text block of the response.
    fn text(self) -> Result<String> {
        self.content
            .into_iter()
            .find_map(|block| (block.content_type == "text").then_some(block.text))
            .ok_or_else(|| CurataError::provider("anthropic", "no text in API response"))
    }
}

/// Content block in API response.
#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_first_text_block() {
        let raw = r###"{"content": [
            {"type": "tool_use"},
            {"type": "text", "text": "```json\n{\"additions\": \"## Example\", \"fields_added\": [\"examples\"]}\n```"}
        ]}"###;
        let response: ApiResponse = serde_json::from_str(raw).unwrap();
        let text = response.text().unwrap();
        let parsed: GeneratedSections = parse_json_response("anthropic", &text).unwrap();
        assert_eq!(parsed.fields_added, vec!["examples"]);
    }

    #[test]
    fn test_no_text_block_is_error() {
        let response: ApiResponse = serde_json::from_str(r#"{"content": []}"#).unwrap();
        assert!(response.text().is_err());
    }
}
