//! Content type classification.
//!
//! Each item moves through `Unclassified → RuleMatched | RuleAmbiguous →
//! FallbackClassified → Final`. The rule stage returns
//! `Result<RuleMatch, LowConfidence>`; the `Err` branch is handled by the
//! keyword-density fallback, so every item ends with a type.
//!
//! # Example
//!
//! ```
//! use curata::classify::Classifier;
//! use curata::config::ClassifierConfig;
//! use curata::{CandidateItem, ContentType};
//!
//! let classifier = Classifier::new(&ClassifierConfig::default()).unwrap();
//! let item = classifier.classify(CandidateItem::new(
//!     "1",
//!     "You are a senior copywriter. Write 3 taglines for a coffee brand.",
//! ));
//! assert_eq!(item.content_type, ContentType::Prompt);
//! assert!(item.classification_confidence >= 0.9);
//! ```

mod fallback;
pub mod keywords;
mod rules;
mod validate;

pub use fallback::{FallbackDecision, MAX_FALLBACK_CONFIDENCE, classify_by_density};
pub use rules::{LowConfidence, RuleMatch, RuleSet};
pub use validate::validate_confidence;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ClassifierConfig;
use crate::error::Result;
use crate::item::{
    CandidateItem, ClassificationMethod, ClassifiedItem, ConfidenceBand, ContentType, Features,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub total_items: usize,
    pub output_count: usize,
    pub by_type: IndexMap<String, usize>,
    pub by_method: IndexMap<String, usize>,
    pub confidence_distribution: IndexMap<String, usize>,
}

impl ClassificationReport {
    fn empty() -> Self {
        let mut report = Self::default();
        for t in ContentType::ALL {
            report.by_type.insert(t.to_string(), 0);
        }
        for m in [ClassificationMethod::Rules, ClassificationMethod::Fallback] {
            report.by_method.insert(m.to_string(), 0);
        }
        for b in [
            ConfidenceBand::HighConfidence,
            ConfidenceBand::NeedsReview,
            ConfidenceBand::Uncertain,
        ] {
            report.confidence_distribution.insert(b.key().to_string(), 0);
        }
        report
    }

    fn record(&mut self, item: &ClassifiedItem) {
        *self.by_type.entry(item.content_type.to_string()).or_default() += 1;
        *self
            .by_method
            .entry(item.classification_method.to_string())
            .or_default() += 1;
        *self
            .confidence_distribution
            .entry(item.confidence_band().key().to_string())
            .or_default() += 1;
    }
}

/// Assigns exactly one type to each item.
pub struct Classifier {
    rules: RuleSet,
}

impl Classifier {
    pub fn new(config: &ClassifierConfig) -> Result<Self> {
        Ok(Self {
            rules: RuleSet::new(config.min_rule_confidence)?,
        })
    }

    /// Classify one item. Features are extracted here, once.
    pub fn classify(&self, candidate: CandidateItem) -> ClassifiedItem {
        let features = Features::extract(&candidate.content);

        let (content_type, confidence, method, reason, matched_rule) =
            match self.rules.evaluate(&candidate.content, &features) {
                Ok(m) => (
                    m.content_type,
                    m.confidence,
                    ClassificationMethod::Rules,
                    m.reason,
                    Some(m.rule),
                ),
                Err(LowConfidence { best }) => {
                    let d = classify_by_density(&features);
                    let reason = match best {
                        Some(b) => format!(
                            "{} (rule '{}' only reached {:.2})",
                            d.reason, b.rule, b.confidence
                        ),
                        None => d.reason,
                    };
                    (
                        d.content_type,
                        d.confidence,
                        ClassificationMethod::Fallback,
                        reason,
                        None,
                    )
                }
            };

        let (validated, checks) = validate_confidence(content_type, confidence, &features);
        let classification_reason = if checks.is_empty() {
            reason
        } else {
            format!("{}; lowered by {}", reason, checks.join(", "))
        };

        debug!(
            id = %candidate.id,
            content_type = %content_type,
            confidence,
            validated,
            method = %method,
            "classified"
        );

        ClassifiedItem {
            candidate,
            content_type,
            classification_confidence: confidence,
            validated_confidence: validated,
            classification_method: method,
            classification_reason,
            matched_rule,
            features,
        }
    }

    pub fn classify_batch(
        &self,
        items: Vec<CandidateItem>,
    ) -> (Vec<ClassifiedItem>, ClassificationReport) {
        let mut report = ClassificationReport::empty();
        report.total_items = items.len();

        let classified: Vec<ClassifiedItem> = items
            .into_iter()
            .map(|item| {
                let c = self.classify(item);
                report.record(&c);
                c
            })
            .collect();

        report.output_count = classified.len();
        info!(
            total = report.total_items,
            rules = report.by_method.get("rules").copied().unwrap_or(0),
            fallback = report.by_method.get("fallback").copied().unwrap_or(0),
            "classification finished"
        );
        (classified, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::new(&ClassifierConfig::default()).unwrap()
    }

    #[test]
    fn test_copywriter_prompt() {
        let item = classifier().classify(
            CandidateItem::new(
                "1",
                "You are a senior copywriter. Write 3 taglines for a coffee brand.",
            )
            .with_title("Copy prompt"),
        );
        assert_eq!(item.content_type, ContentType::Prompt);
        assert_eq!(item.classification_method, ClassificationMethod::Rules);
        assert!(item.classification_confidence >= 0.9);
        assert_eq!(item.validated_confidence, item.classification_confidence);
        assert_eq!(item.matched_rule.as_deref(), Some("role_assignment"));
    }

    #[test]
    fn test_ambiguous_text_defaults_to_guide() {
        let item = classifier().classify(CandidateItem::new("2", "Lorem ipsum dolor sit amet."));
        assert_eq!(item.content_type, ContentType::Guide);
        assert_eq!(item.classification_method, ClassificationMethod::Fallback);
        assert!(item.classification_confidence <= MAX_FALLBACK_CONFIDENCE);
    }

    #[test]
    fn test_validation_lowers_short_guide() {
        let item = classifier().classify(CandidateItem::new("3", "A quick guide to tea."));
        assert_eq!(item.content_type, ContentType::Guide);
        assert!(item.validated_confidence < item.classification_confidence);
        assert!(item.classification_reason.contains("guide_too_short"));
    }

    #[test]
    fn test_features_are_attached() {
        let item = classifier().classify(CandidateItem::new("4", "```rust\nfn main() {}\n```"));
        assert!(item.features.has_code_block);
    }

    #[test]
    fn test_batch_report() {
        let (items, report) = classifier().classify_batch(vec![
            CandidateItem::new("1", "You are a chef. Create a menu."),
            CandidateItem::new("2", "Lorem ipsum."),
        ]);
        assert_eq!(items.len(), 2);
        assert_eq!(report.total_items, 2);
        assert_eq!(report.by_type["Prompt"], 1);
        assert_eq!(report.by_type["Guide"], 1);
        assert_eq!(report.by_method["fallback"], 1);
        let banded: usize = report.confidence_distribution.values().sum();
        assert_eq!(banded, 2);
    }
}
