use serde::{Deserialize, Serialize};

use super::{CandidateItem, ClassifiedItem, ScoredItem};

/// How far along the pipeline a record has travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Candidate,
    Classified,
    Scored,
}

/// Any record that can appear in an NDJSON stream.
///
/// Variants are distinguished by which fields are populated; the most
/// specific shape is tried first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PipelineItem {
    Scored(Box<ScoredItem>),
    Classified(Box<ClassifiedItem>),
    Candidate(CandidateItem),
}

impl PipelineItem {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineItem::Scored(_) => Stage::Scored,
            PipelineItem::Classified(_) => Stage::Classified,
            PipelineItem::Candidate(_) => Stage::Candidate,
        }
    }

    pub fn candidate(&self) -> &CandidateItem {
        match self {
            PipelineItem::Scored(s) => &s.classified.candidate,
            PipelineItem::Classified(c) => &c.candidate,
            PipelineItem::Candidate(c) => c,
        }
    }

    /// Drop everything a later stage added and return the original candidate.
    pub fn into_candidate(self) -> CandidateItem {
        match self {
            PipelineItem::Scored(s) => s.classified.candidate,
            PipelineItem::Classified(c) => c.candidate,
            PipelineItem::Candidate(c) => c,
        }
    }
}

impl From<CandidateItem> for PipelineItem {
    fn from(item: CandidateItem) -> Self {
        PipelineItem::Candidate(item)
    }
}

impl From<ClassifiedItem> for PipelineItem {
    fn from(item: ClassifiedItem) -> Self {
        PipelineItem::Classified(Box::new(item))
    }
}

impl From<ScoredItem> for PipelineItem {
    fn from(item: ScoredItem) -> Self {
        PipelineItem::Scored(Box::new(item))
    }
}
