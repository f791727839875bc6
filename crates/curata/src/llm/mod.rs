//! LLM provider integration for content enhancement.
//!
//! Providers fill supporting gaps (examples, details, cautions) in approved
//! items when web search has nothing to offer. The integration is optional:
//! without a provider the enhancer falls through to its other strategies.
//!
//! # Supported Providers
//!
//! - **Anthropic** - Claude models via API (requires `ANTHROPIC_API_KEY`)
//! - **Ollama** - Local models, no API key needed (requires Ollama installed)
//! - **Mock** - Deterministic sections for tests and dry runs
//!
//! # Example
//!
//! ```no_run
//! use curata::{OllamaProvider, Pipeline, PipelineConfig};
//!
//! let pipeline = Pipeline::new(PipelineConfig::default())
//!     .unwrap()
//!     .with_llm(OllamaProvider::new().unwrap());
//! ```

mod anthropic;
mod mock;
mod ollama;
mod prompts;
mod provider;

pub use anthropic::AnthropicProvider;
pub use mock::MockProvider;
pub use ollama::OllamaProvider;
pub use provider::{GeneratedSections, GenerationRequest, LlmConfig, LlmProvider};
