//! Text embedding backends for semantic deduplication.
//!
//! - [`HashedEmbedder`]: deterministic local term vectors, always available
//! - [`OllamaEmbedder`]: neural embeddings from a local Ollama server

mod hashed;
mod ollama;
mod provider;
mod similarity;

pub use hashed::HashedEmbedder;
pub use ollama::OllamaEmbedder;
pub use provider::EmbeddingProvider;
pub use similarity::{cosine_similarity, similarity_matrix};
