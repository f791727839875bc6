//! Keyword-density fallback when no rule is confident enough.

use crate::item::{ContentType, Features};

/// Confidence ceiling for fallback decisions. Stays below the strongest
/// rule-based confidences.
pub const MAX_FALLBACK_CONFIDENCE: f64 = 0.9;

/// Confidence when no type has any keyword signal.
const NO_SIGNAL_CONFIDENCE: f64 = 0.3;

#[derive(Debug, Clone, PartialEq)]
pub struct FallbackDecision {
    pub content_type: ContentType,
    pub confidence: f64,
    pub reason: String,
}

/// Score all four types by keyword count and pick the highest.
///
/// Confidence grows with the margin over the runner-up and is capped at
/// [`MAX_FALLBACK_CONFIDENCE`]. Ties go to the earlier type in
/// [`ContentType::ALL`]; no signal at all defaults to Guide.
pub fn classify_by_density(features: &Features) -> FallbackDecision {
    let mut scores: Vec<(ContentType, u32)> = ContentType::ALL
        .iter()
        .map(|t| (*t, features.keyword_count(*t)))
        .collect();
    // Stable sort keeps tie-break order.
    scores.sort_by(|a, b| b.1.cmp(&a.1));

    let (winner, top) = scores[0];
    let runner_up = scores[1].1;

    if top == 0 {
        return FallbackDecision {
            content_type: ContentType::Guide,
            confidence: NO_SIGNAL_CONFIDENCE,
            reason: "no type keywords found, defaulted to Guide".to_string(),
        };
    }

    let margin = top - runner_up;
    let confidence = (0.5 + 0.1 * f64::from(margin)).min(MAX_FALLBACK_CONFIDENCE);
    FallbackDecision {
        content_type: winner,
        confidence,
        reason: format!(
            "{} {} keywords, margin {} over runner-up",
            top,
            winner.key(),
            margin
        ),
    }
}
