use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{ClassifiedItem, ContentType};

/// Coarse quality bucket. Ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Low,
    Medium,
    High,
}

impl QualityTier {
    /// `>= threshold` is high, `>= threshold - 20` is medium, else low.
    pub fn from_score(total: f64, threshold: f64) -> Self {
        if total >= threshold {
            QualityTier::High
        } else if total >= threshold - 20.0 {
            QualityTier::Medium
        } else {
            QualityTier::Low
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            QualityTier::Low => "low",
            QualityTier::Medium => "medium",
            QualityTier::High => "high",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A classified item with its rubric scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    #[serde(flatten)]
    pub classified: ClassifiedItem,

    /// Named rubric dimensions in rubric order.
    pub dimension_scores: IndexMap<String, f64>,

    /// Exact sum of `dimension_scores`.
    pub total_score: f64,

    /// Type-specific threshold the tier was derived from.
    pub threshold: f64,

    pub quality_tier: QualityTier,

    #[serde(default)]
    pub scoring_reason: String,
}

impl ScoredItem {
    pub fn id(&self) -> &str {
        self.classified.id()
    }

    pub fn content(&self) -> &str {
        self.classified.content()
    }

    pub fn title(&self) -> &str {
        &self.classified.candidate.title
    }

    pub fn content_type(&self) -> ContentType {
        self.classified.content_type
    }
}
