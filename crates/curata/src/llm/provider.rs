//! LLM provider trait and types.

use serde::{Deserialize, Serialize};

use crate::error::{CurataError, Result};
use crate::item::ContentType;

/// What the enhancer asks a model to add to one item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub content_type: ContentType,
    pub title: String,
    pub content: String,
    /// Gap keys to fill, e.g. `examples`, `details`, `cautions`.
    pub gaps: Vec<String>,
}

/// Sections generated for an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSections {
    /// Markdown appended to the original content.
    pub additions: String,

    /// Gap keys the model claims to have filled.
    #[serde(default)]
    pub fields_added: Vec<String>,
}

/// Configuration for LLM providers.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model to use (e.g., "claude-sonnet-4-20250514").
    pub model: String,

    /// Maximum tokens in response.
    pub max_tokens: usize,

    /// Temperature for generation (0.0-1.0).
    pub temperature: f64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 1024,
            temperature: 0.3,
        }
    }
}

/// Trait for LLM providers.
///
/// Implementations must be thread-safe (Send + Sync) so one provider can be
/// shared by every item of a batch.
pub trait LlmProvider: Send + Sync {
    /// Generate the missing sections named in `request.gaps`.
    fn generate_enhancement(&self, request: &GenerationRequest) -> Result<GeneratedSections>;

    /// Get the configuration for this provider.
    fn config(&self) -> &LlmConfig;

    /// Get the name of this provider (for logging/debugging).
    fn name(&self) -> &str;
}

/// Parse JSON from an LLM response, handling markdown code blocks.
pub(crate) fn parse_json_response<T: for<'de> Deserialize<'de>>(
    provider: &str,
    response: &str,
) -> Result<T> {
    let json_str = if response.contains("```json") {
        response
            .split("```json")
            .nth(1)
            .and_then(|s| s.split("```").next())
            .map(|s| s.trim())
            .unwrap_or(response)
    } else if response.contains("```") {
        response
            .split("```")
            .nth(1)
            .map(|s| s.trim())
            .unwrap_or(response)
    } else {
        response.trim()
    };

    serde_json::from_str(json_str).map_err(|e| {
        CurataError::provider(provider, format!("failed to parse LLM JSON response: {}", e))
    })
}
