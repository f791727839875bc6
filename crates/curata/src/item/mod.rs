//! The record shapes that flow through the pipeline.
//!
//! Each stage produces a new, strictly additive record wrapping the previous
//! one: [`CandidateItem`] → [`ClassifiedItem`] → [`ScoredItem`]. The original
//! candidate is never mutated.

mod candidate;
mod classified;
mod features;
mod record;
mod scored;

pub use candidate::{CandidateItem, Source};
pub use classified::{ClassificationMethod, ClassifiedItem, ConfidenceBand, ContentType};
pub use features::Features;
pub use record::{PipelineItem, Stage};
pub use scored::{QualityTier, ScoredItem};
