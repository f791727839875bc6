use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::ClassificationReport;
use crate::clean::{CleanReport, Discarded};
use crate::dedup::{DedupReport, DuplicateRecord};
use crate::enhance::{CuratedItem, EnhancementReport};
use crate::filter::{FilterReport, FilteredItem};
use crate::input::ReadReport;
use crate::score::ScoringReport;

/// Where every input item ended up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineTotals {
    pub total_items: usize,
    pub auto_approved: usize,
    pub needs_review: usize,
    pub rejected: usize,
    pub duplicates: usize,
    pub discarded: usize,
    /// `total_items` equals the sum of the other counts.
    pub balanced: bool,
}

impl PipelineTotals {
    pub fn new(
        total_items: usize,
        auto_approved: usize,
        needs_review: usize,
        rejected: usize,
        duplicates: usize,
        discarded: usize,
    ) -> Self {
        Self {
            total_items,
            auto_approved,
            needs_review,
            rejected,
            duplicates,
            discarded,
            balanced: total_items
                == auto_approved + needs_review + rejected + duplicates + discarded,
        }
    }
}

/// Per-stage reports for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<ReadReport>,
    pub dedup: DedupReport,
    pub cleaning: CleanReport,
    pub classification: ClassificationReport,
    pub scoring: ScoringReport,
    pub filter: FilterReport,
    pub enhancement: EnhancementReport,
    pub totals: PipelineTotals,
}

/// Every item of a run, partitioned by outcome.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub approved: Vec<CuratedItem>,
    pub needs_review: Vec<FilteredItem>,
    pub rejected: Vec<FilteredItem>,
    pub duplicates: Vec<DuplicateRecord>,
    pub discarded: Vec<Discarded>,
    pub report: PipelineReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_balance() {
        assert!(PipelineTotals::new(10, 3, 2, 2, 2, 1).balanced);
        assert!(!PipelineTotals::new(10, 3, 2, 2, 2, 0).balanced);
    }
}
