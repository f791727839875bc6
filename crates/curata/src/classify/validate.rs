//! Structural sanity checks that can only lower a classification's confidence.

use crate::item::{ContentType, Features};

/// Apply the per-type checks and return the validated confidence plus the
/// names of the checks that lowered it.
pub fn validate_confidence(
    content_type: ContentType,
    confidence: f64,
    features: &Features,
) -> (f64, Vec<&'static str>) {
    let mut factor = 1.0;
    let mut applied = Vec::new();

    match content_type {
        ContentType::Prompt if features.content_length > 1000 => {
            factor *= 0.8;
            applied.push("prompt_too_long");
        }
        ContentType::Guide if features.content_length < 300 => {
            factor *= 0.7;
            applied.push("guide_too_short");
        }
        ContentType::Workflow if !features.has_numbered_steps => {
            factor *= 0.6;
            applied.push("workflow_without_steps");
        }
        ContentType::IndustryKnowledge if !features.has_code_block => {
            factor *= 0.8;
            applied.push("industry_without_code");
        }
        _ => {}
    }

    ((confidence * factor).clamp(0.0, 1.0), applied)
}
