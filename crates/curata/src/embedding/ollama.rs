//! Ollama embedding backend.
//!
//! Uses the `/api/embed` endpoint of a local Ollama server. Pull a model
//! first, e.g. `ollama pull all-minilm`.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;

use crate::error::{CurataError, Result};

use super::provider::EmbeddingProvider;

/// Default Ollama host.
const DEFAULT_HOST: &str = "http://localhost:11434";

/// all-minilm produces 384-dimensional vectors.
const DEFAULT_MODEL: &str = "all-minilm";
const DEFAULT_DIMENSIONS: usize = 384;

pub struct OllamaEmbedder {
    client: Client,
    host: String,
    model: String,
    dimensions: usize,
}

impl OllamaEmbedder {
    /// Create an embedder for the default model.
    pub fn new() -> Result<Self> {
        Self::with_model(DEFAULT_MODEL, DEFAULT_DIMENSIONS)
    }

    /// Create an embedder for a specific model and its vector length.
    pub fn with_model(model: impl Into<String>, dimensions: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| CurataError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let host = std::env::var("OLLAMA_HOST")
            .map(|h| h.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_HOST.to_string());

        Ok(Self {
            client,
            host,
            model: model.into(),
            dimensions,
        })
    }

    /// Override the server address.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into().trim_end_matches('/').to_string();
        self
    }

    fn error(&self, message: impl Into<String>) -> CurataError {
        CurataError::provider("ollama-embed", message)
    }
}

impl EmbeddingProvider for OllamaEmbedder {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let body = json!({
            "model": self.model,
            "input": texts,
        });

        let response = self
            .client
            .post(format!("{}/api/embed", self.host))
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    self.error("Failed to connect to Ollama. Is it running? Start with: ollama serve")
                } else {
                    self.error(format!("request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            return Err(self.error(format!("HTTP {}: {}", status, error_text)));
        }

        let parsed: EmbedResponse = response
            .json()
            .map_err(|e| self.error(format!("Failed to parse response: {}", e)))?;

        if parsed.embeddings.len() != texts.len() {
            return Err(self.error(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                parsed.embeddings.len()
            )));
        }
        if let Some(bad) = parsed.embeddings.iter().find(|v| v.len() != self.dimensions) {
            return Err(self.error(format!(
                "expected {}-dimensional vectors, got {}",
                self.dimensions,
                bad.len()
            )));
        }
        Ok(parsed.embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "ollama-embed"
    }

    fn is_available(&self) -> bool {
        self.client
            .get(format!("{}/api/tags", self.host))
            .timeout(Duration::from_secs(2))
            .send()
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    #[serde(default)]
    embeddings: Vec<Vec<f32>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_host_is_unavailable() {
        let embedder = OllamaEmbedder::new()
            .unwrap()
            .with_host("http://127.0.0.1:9/");
        assert_eq!(embedder.host, "http://127.0.0.1:9");
        assert!(!embedder.is_available());
        assert!(embedder.embed_batch(&["x".to_string()]).is_err());
    }

    #[test]
    fn test_empty_batch_needs_no_server() {
        let embedder = OllamaEmbedder::new().unwrap().with_host("http://127.0.0.1:9");
        assert!(embedder.embed_batch(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_parse_response() {
        let parsed: EmbedResponse =
            serde_json::from_str(r#"{"model":"all-minilm","embeddings":[[0.1,0.2],[0.3,0.4]]}"#)
                .unwrap();
        assert_eq!(parsed.embeddings.len(), 2);
    }
}
