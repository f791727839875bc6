use crate::config::ReviewConfig;
use crate::item::{QualityTier, ScoredItem};

use super::decision::ReviewReason;

/// Every review reason that applies, in check order.
pub fn review_reasons(item: &ScoredItem, incomplete: bool, config: &ReviewConfig) -> Vec<ReviewReason> {
    let mut reasons = Vec::new();

    // Validation only lowers confidence, so this also catches every item
    // whose raw confidence is below the bar.
    if item.classified.validated_confidence < config.min_confidence {
        reasons.push(ReviewReason::LowClassificationConfidence);
    }
    if item.quality_tier == QualityTier::Medium {
        reasons.push(ReviewReason::MediumQuality);
    }
    let len = item.classified.features.content_length;
    if len < config.content_min_chars || len > config.content_max_chars {
        reasons.push(ReviewReason::UnusualLength);
    }
    if incomplete {
        reasons.push(ReviewReason::IncompleteFields);
    }
    reasons
}
