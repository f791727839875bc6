use std::fmt;

use serde::{Deserialize, Serialize};

use crate::item::ScoredItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOutcome {
    AutoApproved,
    NeedsReview,
    Rejected,
}

impl fmt::Display for FilterOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FilterOutcome::AutoApproved => "auto_approved",
            FilterOutcome::NeedsReview => "needs_review",
            FilterOutcome::Rejected => "rejected",
        };
        write!(f, "{}", s)
    }
}

/// Why a surviving item was routed to human review, in check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewReason {
    LowClassificationConfidence,
    MediumQuality,
    UnusualLength,
    IncompleteFields,
}

impl ReviewReason {
    pub const ALL: [ReviewReason; 4] = [
        ReviewReason::LowClassificationConfidence,
        ReviewReason::MediumQuality,
        ReviewReason::UnusualLength,
        ReviewReason::IncompleteFields,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ReviewReason::LowClassificationConfidence => "low_classification_confidence",
            ReviewReason::MediumQuality => "medium_quality",
            ReviewReason::UnusualLength => "unusual_length",
            ReviewReason::IncompleteFields => "incomplete_fields",
        }
    }
}

impl fmt::Display for ReviewReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// The filter's verdict on one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDecision {
    pub outcome: FilterOutcome,
    /// Every rule that fired, in evaluation order. Never empty when rejected.
    pub reasons: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_reason: Option<ReviewReason>,
}

impl FilterDecision {
    pub fn rejected(reasons: Vec<String>) -> Self {
        debug_assert!(!reasons.is_empty());
        Self {
            outcome: FilterOutcome::Rejected,
            reasons,
            review_reason: None,
        }
    }
}

/// A scored item with its decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredItem {
    #[serde(flatten)]
    pub item: ScoredItem,
    pub decision: FilterDecision,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;
    use crate::config::{ClassifierConfig, PipelineConfig, ScoringConfig};
    use crate::filter::{
        COMPLIANCE_NSFW, DEDUP_EXACT, DedupRule, FilterReport, QualityFilter,
        THRESHOLD_LOW_QUALITY,
    };
    use crate::item::{CandidateItem, QualityTier};
    use crate::score::Scorer;

    fn scored(id: &str, title: &str, content: &str) -> ScoredItem {
        let classifier = Classifier::new(&ClassifierConfig::default()).unwrap();
        let scorer = Scorer::new(&ScoringConfig::default()).unwrap();
        scorer.score(classifier.classify(CandidateItem::new(id, content).with_title(title)))
    }

    #[test]
    fn test_low_tier_nsfw_reports_threshold_only() {
        let item = scored("1", "", "Lorem ipsum nsfw.");
        assert_eq!(item.quality_tier, QualityTier::Low);

        let filter = QualityFilter::new(&PipelineConfig::default()).unwrap();
        let mut report = FilterReport::default();
        let decision = filter.decide(&item, &mut DedupRule::default(), &mut report);

        assert_eq!(decision.outcome, FilterOutcome::Rejected);
        assert_eq!(decision.reasons, vec![THRESHOLD_LOW_QUALITY]);
        assert_eq!(report.threshold_rejected, 1);
        assert_eq!(report.compliance.rejected, 0);
    }

    #[test]
    fn test_duplicate_nsfw_reports_dedup_first() {
        let content = "You are a senior copywriter. Write 3 taglines for a coffee brand. Keep it NSFW.";
        let filter = QualityFilter::new(&PipelineConfig::default()).unwrap();
        let mut dedup = DedupRule::default();
        let mut report = FilterReport::default();

        let first = filter.decide(&scored("1", "Copy prompt", content), &mut dedup, &mut report);
        let second = filter.decide(&scored("2", "Copy prompt", content), &mut dedup, &mut report);

        assert_eq!(first.reasons, vec![COMPLIANCE_NSFW]);
        assert_eq!(second.reasons, vec![DEDUP_EXACT]);
    }

    #[test]
    fn test_rejected_constructor() {
        let decision = FilterDecision::rejected(vec!["threshold:low_quality".to_string()]);
        assert_eq!(decision.outcome, FilterOutcome::Rejected);
        assert!(decision.review_reason.is_none());
    }
}
