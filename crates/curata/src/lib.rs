//! Curata: a curation pipeline for harvested text snippets.
//!
//! Raw snippets scraped from code hosts and forums go through
//! Dedup → Clean → Classify → Score → Filter → Enhance. Each one comes out
//! typed and scored, in exactly one output partition.
//!
//! # Core Principles
//!
//! - **Nothing disappears silently**: every removed item carries a named reason
//! - **Additive records**: stages extend items, original content is kept
//! - **Degrade, don't fail**: external backends only affect recall
//!
//! # Example
//!
//! ```no_run
//! use curata::{Pipeline, PipelineConfig};
//!
//! let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
//! let output = pipeline.run_file("candidates.jsonl").unwrap();
//!
//! println!("Approved: {}", output.approved.len());
//! println!("Needs review: {}", output.needs_review.len());
//! ```

pub mod classify;
pub mod clean;
pub mod config;
pub mod dedup;
pub mod embedding;
pub mod enhance;
pub mod error;
pub mod filter;
pub mod input;
pub mod item;
pub mod llm;
pub mod pipeline;
pub mod retry;
pub mod score;

pub use config::{PipelineConfig, load_config, load_config_from_str};
pub use embedding::{EmbeddingProvider, HashedEmbedder, OllamaEmbedder};
pub use enhance::{
    CuratedItem, EnhancementMethod, EnhancementRecord, MockSearchProvider, SearchProvider,
    SearxngProvider, SectionOutliner,
};
pub use error::{CurataError, Result};
pub use filter::{FilterDecision, FilterOutcome, FilteredItem};
pub use item::{
    CandidateItem, ClassificationMethod, ClassifiedItem, ContentType, Features, QualityTier,
    ScoredItem, Source,
};
pub use llm::{AnthropicProvider, LlmProvider, MockProvider, OllamaProvider};
pub use pipeline::{Pipeline, PipelineOutput, PipelineReport};
