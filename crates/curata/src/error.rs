//! Error types for the Curata library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Curata operations.
#[derive(Debug, Error)]
pub enum CurataError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record in an NDJSON stream could not be turned into an item.
    #[error("Malformed record at line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    /// Configuration error. Always fatal before any item is processed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An external collaborator (embedding, search, LLM, tool) failed.
    #[error("{provider} error: {message}")]
    Provider { provider: String, message: String },

    /// Error writing pipeline outputs.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl CurataError {
    /// Shorthand for a provider failure.
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an IO failure on a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for Curata operations.
pub type Result<T> = std::result::Result<T, CurataError>;
