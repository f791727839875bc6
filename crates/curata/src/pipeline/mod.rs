//! End-to-end curation runs.
//!
//! [`Pipeline`] owns a [`PipelineContext`] with every stage compiled once,
//! runs a batch through all of them, and returns a [`PipelineOutput`] in
//! which every input item is accounted for: approved, in review, rejected,
//! a duplicate, or discarded by the cleaner.

mod context;
mod report;
mod runner;

pub use context::PipelineContext;
pub use report::{PipelineOutput, PipelineReport, PipelineTotals};
pub use runner::{
    APPROVED_FILE, DISCARDED_FILE, DUPLICATES_FILE, NEEDS_REVIEW_FILE, Pipeline, REJECTED_FILE,
    REPORT_FILE,
};
