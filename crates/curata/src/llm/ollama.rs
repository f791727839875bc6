//! Ollama local LLM provider implementation.
//!
//! Ollama allows running LLMs locally without API keys.
//! Install from: https://ollama.ai

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

/// Default Ollama API endpoint.
const DEFAULT_API_URL: &str = "http://localhost:11434/api/chat";

/// Ollama local LLM provider.
pub struct OllamaProvider {
    client: Client,
    api_url: String,
    config: LlmConfig,
}

impl OllamaProvider {
    /// Create a new Ollama provider with default settings.
    ///
    /// Uses llama3.2 model by default. Make sure you've pulled it:
    /// `ollama pull llama3.2`
    pub fn new() -> Result<Self> {
        Self::with_model("llama3.2")
    }

    /// Create with a specific model.
    pub fn with_model(model: impl Into<String>) -> Result<Self> {
        let config = LlmConfig {
            model: model.into(),
            ..LlmConfig::default()
        };
        Self::with_config(config)
    }

    /// Create with custom configuration.
    pub fn with_config(config: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120)) // Local models can be slower
            .build()
            .map_err(|e| {
                CurataError::Config(format!("Failed to create HTTP client: {}", e))
            })?;

        let api_url = std::env::var("OLLAMA_HOST")
            .map(|host| format!("{}/api/chat", host.trim_end_matches('/')))
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Self {
            client,
            api_url,
            config,
        })
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// Send a message to Ollama.
    fn send_message(&self, user_prompt: &str) -> Result<String> {
        let body = json!({
            "model": self.config.model,
            "stream": false,
            "options": {
                "temperature": self.config.temperature,
                "num_predict": self.config.max_tokens
            },
            "messages": [
                {
                    "role": "system",
                    "content": prompts::system_prompt()
                },
                {
                    "role": "user",
                    "content": user_prompt
                }
            ]
        });

        let response = self
            .client
            .post(&self.api_url)
            .headers(self.build_headers())
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    CurataError::provider(
                        "ollama",
                        "failed to connect to Ollama. Is it running? Start with: ollama serve",
                    )
                } else {
                    CurataError::provider("ollama", format!("request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();

            if error_text.contains("not found") {
                return Err(CurataError::provider(
                    "ollama",
                    format!(
                        "model '{}' not found. Pull it with: ollama pull {}",
                        self.config.model, self.config.model
                    ),
                ));
            }

            return Err(CurataError::provider(
                "ollama",
                format!("API error ({}): {}", status, error_text),
            ));
        }

        let api_response: OllamaResponse = response.json().map_err(|e| {
            CurataError::provider("ollama", format!("failed to parse response: {}", e))
        })?;

        Ok(api_response.message.content)
    }
}

impl LlmProvider for OllamaProvider {
    fn generate_enhancement(&self, request: &GenerationRequest) -> Result<GeneratedSections> {
        let prompt = prompts::enhancement_prompt(request);
        let response = self.send_message(&prompt)?;
        parse_json_response(self.name(), &response)
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

/// Ollama API response structure.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: OllamaMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_model_sets_model() {
        let provider = OllamaProvider::with_model("mistral").unwrap();
        assert_eq!(provider.config().model, "mistral");
        assert!(provider.api_url.ends_with("/api/chat"));
    }

    #[test]
    fn test_parse_chat_response() {
        let raw = r###"{"message": {"role": "assistant", "content": "{\"additions\": \"## Notes\"}"}}"###;
        let parsed: OllamaResponse = serde_json::from_str(raw).unwrap();
        let sections: GeneratedSections =
            parse_json_response("ollama", &parsed.message.content).unwrap();
        assert_eq!(sections.additions, "## Notes");
    }
}
