//! Type-specific multi-dimensional scoring.
//!
//! Every type owns a [`Rubric`] whose dimension maxima sum to 100. The total
//! is the exact sum of dimension scores, and the tier compares it to the
//! type's configured threshold.

mod rubric;
mod rubrics;

pub use rubric::{Dimension, Rubric, Signal, SignalTest};
pub use rubrics::build_rubrics;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{ScoreThresholds, ScoringConfig};
use crate::error::{CurataError, Result};
use crate::item::{ClassifiedItem, ContentType, Features, QualityTier, ScoredItem};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringReport {
    pub total_items: usize,
    pub output_count: usize,
    pub quality_distribution: IndexMap<String, usize>,
    pub type_distribution: IndexMap<String, usize>,
    pub average_score: f64,
}

/// Scores classified items against their type's rubric.
pub struct Scorer {
    rubrics: IndexMap<ContentType, Rubric>,
    thresholds: ScoreThresholds,
}

impl Scorer {
    pub fn new(config: &ScoringConfig) -> Result<Self> {
        let rubrics: IndexMap<ContentType, Rubric> = build_rubrics()?
            .into_iter()
            .map(|r| (r.content_type, r))
            .collect();
        for t in ContentType::ALL {
            if !rubrics.contains_key(&t) {
                return Err(CurataError::Config(format!("no rubric for {}", t)));
            }
        }
        Ok(Self {
            rubrics,
            thresholds: config.thresholds.clone(),
        })
    }

    /// Every type has a rubric once `new` has succeeded.
    pub fn rubric(&self, content_type: ContentType) -> &Rubric {
        &self.rubrics[&content_type]
    }

    pub fn threshold(&self, content_type: ContentType) -> f64 {
        self.thresholds.for_type(content_type)
    }

    /// Dimension scores and their sum for arbitrary content.
    pub fn evaluate(
        &self,
        content_type: ContentType,
        content: &str,
        features: &Features,
    ) -> (IndexMap<String, f64>, f64) {
        let dims = self.rubric(content_type).score(content, features);
        let total = dims.values().sum();
        (dims, total)
    }

    pub fn score(&self, item: ClassifiedItem) -> ScoredItem {
        let content_type = item.content_type;
        let (dimension_scores, total_score) =
            self.evaluate(content_type, item.content(), &item.features);
        let threshold = self.threshold(content_type);
        let quality_tier = QualityTier::from_score(total_score, threshold);
        let scoring_reason = scoring_reason(self.rubric(content_type), &dimension_scores);

        debug!(id = %item.id(), total_score, tier = %quality_tier, "scored");

        ScoredItem {
            classified: item,
            dimension_scores,
            total_score,
            threshold,
            quality_tier,
            scoring_reason,
        }
    }

    pub fn score_batch(&self, items: Vec<ClassifiedItem>) -> (Vec<ScoredItem>, ScoringReport) {
        let mut report = ScoringReport {
            total_items: items.len(),
            ..Default::default()
        };
        for tier in [QualityTier::High, QualityTier::Medium, QualityTier::Low] {
            report.quality_distribution.insert(tier.key().to_string(), 0);
        }
        for t in ContentType::ALL {
            report.type_distribution.insert(t.to_string(), 0);
        }

        let scored: Vec<ScoredItem> = items.into_iter().map(|i| self.score(i)).collect();
        for s in &scored {
            *report
                .quality_distribution
                .entry(s.quality_tier.key().to_string())
                .or_default() += 1;
            *report
                .type_distribution
                .entry(s.content_type().to_string())
                .or_default() += 1;
        }
        report.output_count = scored.len();
        report.average_score = if scored.is_empty() {
            0.0
        } else {
            scored.iter().map(|s| s.total_score).sum::<f64>() / scored.len() as f64
        };

        info!(
            total = report.total_items,
            high = report.quality_distribution["high"],
            medium = report.quality_distribution["medium"],
            low = report.quality_distribution["low"],
            average = report.average_score,
            "scoring finished"
        );
        (scored, report)
    }
}

/// Names the two strongest dimensions, relative to their maxima.
fn scoring_reason(rubric: &Rubric, dims: &IndexMap<String, f64>) -> String {
    let mut ranked: Vec<(&str, f64, f64)> = rubric
        .dimensions
        .iter()
        .map(|d| (d.name, dims.get(d.name).copied().unwrap_or(0.0), d.max))
        .filter(|(_, v, _)| *v > 0.0)
        .collect();
    if ranked.is_empty() {
        return "no rubric signals fired".to_string();
    }
    ranked.sort_by(|a, b| (b.1 / b.2).total_cmp(&(a.1 / a.2)));
    let top: Vec<String> = ranked
        .iter()
        .take(2)
        .map(|(name, v, max)| format!("{} {}/{}", name, v, max))
        .collect();
    format!("strongest: {}", top.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;
    use crate::config::ClassifierConfig;
    use crate::item::CandidateItem;

    fn score(content: &str) -> ScoredItem {
        let classifier = Classifier::new(&ClassifierConfig::default()).unwrap();
        let scorer = Scorer::new(&ScoringConfig::default()).unwrap();
        scorer.score(classifier.classify(CandidateItem::new("x", content)))
    }

    #[test]
    fn test_rubric_lookup_per_type() {
        let scorer = Scorer::new(&ScoringConfig::default()).unwrap();
        for t in ContentType::ALL {
            let rubric = scorer.rubric(t);
            assert_eq!(rubric.content_type, t);
            assert_eq!(rubric.max_total(), 100.0);
        }
    }

    #[test]
    fn test_copywriter_prompt_is_high() {
        let s = score("You are a senior copywriter. Write 3 taglines for a coffee brand.");
        assert_eq!(s.content_type(), ContentType::Prompt);
        assert!(s.dimension_scores["practicality"] >= 15.0);
        assert_eq!(s.total_score, 75.0);
        assert_eq!(s.quality_tier, QualityTier::High);
        assert_eq!(s.threshold, 70.0);
        assert!(s.scoring_reason.starts_with("strongest: practicality"));
    }

    #[test]
    fn test_total_is_sum_of_dimensions() {
        let s = score("## Setup\n1. Install\n2. Configure\n3. Run\n```sh\nmake\n```\nA guide for beginners.");
        let sum: f64 = s.dimension_scores.values().sum();
        assert_eq!(sum, s.total_score);
        assert!(s.total_score <= 100.0);
    }

    #[test]
    fn test_rich_guide_scores_high() {
        let content = "# Getting started with Rust\n\n\
            In this guide you will learn how to set up a project.\n\n\
            ## Prerequisites\n\n- Install rustup\n- A terminal\n\n\
            ## Steps\n\n1. Run `cargo new demo`\n2. Edit src/main.rs\n3. Run `cargo run`\n\n\
            ```sh\ncargo new demo\n```\n\n\
            For example, the hello world template prints a greeting.\n\n\
            Note: the first build downloads the toolchain index, so it is slower.\n\n\
            ## Troubleshooting\n\nCommon errors come from an outdated toolchain.\n\n\
            ## Summary\n\nNext steps: read the book.";
        let s = score(content);
        assert_eq!(s.content_type(), ContentType::Guide);
        assert!(s.total_score >= 75.0, "{:?}", s.dimension_scores);
        assert_eq!(s.quality_tier, QualityTier::High);
    }

    #[test]
    fn test_empty_signal_reason() {
        let s = score("Lorem ipsum.");
        assert!(s.total_score < 50.0);
        assert_eq!(s.quality_tier, QualityTier::Low);
    }

    #[test]
    fn test_report_counts() {
        let classifier = Classifier::new(&ClassifierConfig::default()).unwrap();
        let scorer = Scorer::new(&ScoringConfig::default()).unwrap();
        let items = vec![
            classifier.classify(CandidateItem::new("1", "You are a chef. Create a menu for a bistro.")),
            classifier.classify(CandidateItem::new("2", "Lorem ipsum.")),
        ];
        let (scored, report) = scorer.score_batch(items);
        assert_eq!(scored.len(), 2);
        assert_eq!(report.output_count, 2);
        let tiers: usize = report.quality_distribution.values().sum();
        assert_eq!(tiers, 2);
        assert!(report.average_score > 0.0);
    }
}
