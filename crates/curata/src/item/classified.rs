use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{CandidateItem, Features};

/// The four mutually exclusive content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContentType {
    Prompt,
    Workflow,
    IndustryKnowledge,
    Guide,
}

impl ContentType {
    /// All types, in tie-break order.
    pub const ALL: [ContentType; 4] = [
        ContentType::Prompt,
        ContentType::Workflow,
        ContentType::IndustryKnowledge,
        ContentType::Guide,
    ];

    /// snake_case key used in reports and config.
    pub fn key(&self) -> &'static str {
        match self {
            ContentType::Prompt => "prompt",
            ContentType::Workflow => "workflow",
            ContentType::IndustryKnowledge => "industry_knowledge",
            ContentType::Guide => "guide",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContentType::Prompt => "Prompt",
            ContentType::Workflow => "Workflow",
            ContentType::IndustryKnowledge => "IndustryKnowledge",
            ContentType::Guide => "Guide",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "prompt" => Ok(ContentType::Prompt),
            "workflow" => Ok(ContentType::Workflow),
            "industryknowledge" | "industry_knowledge" | "industry" => {
                Ok(ContentType::IndustryKnowledge)
            }
            "guide" => Ok(ContentType::Guide),
            _ => Err(format!("Unknown content type: {}", s)),
        }
    }
}

/// How a type was assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationMethod {
    Rules,
    Fallback,
}

impl fmt::Display for ClassificationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassificationMethod::Rules => write!(f, "rules"),
            ClassificationMethod::Fallback => write!(f, "fallback"),
        }
    }
}

/// Coarse bucket over validated confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    HighConfidence,
    NeedsReview,
    Uncertain,
}

impl ConfidenceBand {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.9 {
            ConfidenceBand::HighConfidence
        } else if confidence >= 0.7 {
            ConfidenceBand::NeedsReview
        } else {
            ConfidenceBand::Uncertain
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ConfidenceBand::HighConfidence => "high_confidence",
            ConfidenceBand::NeedsReview => "needs_review",
            ConfidenceBand::Uncertain => "uncertain",
        }
    }
}

/// A candidate with an assigned type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedItem {
    #[serde(flatten)]
    pub candidate: CandidateItem,

    #[serde(rename = "type")]
    pub content_type: ContentType,

    /// Confidence reported by the rule or fallback that assigned the type.
    pub classification_confidence: f64,

    /// Confidence after structural sanity checks. Never above the raw value.
    pub validated_confidence: f64,

    pub classification_method: ClassificationMethod,

    #[serde(default)]
    pub classification_reason: String,

    /// Name of the rule that matched, for rule-based classifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_rule: Option<String>,

    pub features: Features,
}

impl ClassifiedItem {
    pub fn id(&self) -> &str {
        &self.candidate.id
    }

    pub fn content(&self) -> &str {
        &self.candidate.content
    }

    pub fn confidence_band(&self) -> ConfidenceBand {
        ConfidenceBand::from_confidence(self.validated_confidence)
    }
}
