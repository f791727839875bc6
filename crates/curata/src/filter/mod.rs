//! Quality filtering and review routing.
//!
//! Rules run in a fixed order and an item rejected by one rule never reaches
//! the next:
//!
//! 1. threshold: `low` tier is rejected
//! 2. dedup: exact duplicate of an already kept item is rejected
//! 3. compliance: NSFW or political keyword match is rejected
//! 4. completeness: missing structure is flagged, not rejected
//!
//! Survivors go to review when confidence is low, quality is medium, length
//! is unusual, or they were flagged incomplete. Everything else is approved.

mod decision;
mod review;
mod rules;

pub use decision::{FilterDecision, FilterOutcome, FilteredItem, ReviewReason};
pub use review::review_reasons;
pub use rules::{
    COMPLIANCE_NSFW, COMPLIANCE_POLITICAL, ComplianceRule, CompletenessRule, DEDUP_EXACT,
    DedupRule, THRESHOLD_LOW_QUALITY, threshold_rule,
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{PipelineConfig, ReviewConfig};
use crate::error::Result;
use crate::item::ScoredItem;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub rejected: usize,
    pub nsfw: usize,
    pub political_sensitive: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletenessReport {
    pub flagged: usize,
    pub missing: IndexMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterReport {
    pub total_items: usize,
    /// Items that were not rejected.
    pub output_count: usize,
    pub threshold_rejected: usize,
    pub dedup_rejected: usize,
    pub compliance: ComplianceReport,
    pub completeness: CompletenessReport,
    pub review_reasons: IndexMap<String, usize>,
    pub auto_approved: usize,
    pub needs_review: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, Default)]
pub struct FilterOutput {
    pub approved: Vec<FilteredItem>,
    pub needs_review: Vec<FilteredItem>,
    pub rejected: Vec<FilteredItem>,
    pub report: FilterReport,
}

/// Partitions scored items into approved, review, and rejected.
pub struct QualityFilter {
    compliance: ComplianceRule,
    completeness: CompletenessRule,
    review: ReviewConfig,
}

impl QualityFilter {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        Ok(Self {
            compliance: ComplianceRule::new(&config.compliance),
            completeness: CompletenessRule::new()?,
            review: config.review.clone(),
        })
    }

    pub fn run(&self, items: Vec<ScoredItem>) -> FilterOutput {
        let mut out = FilterOutput::default();
        out.report.total_items = items.len();
        for reason in ReviewReason::ALL {
            out.report.review_reasons.insert(reason.key().to_string(), 0);
        }

        let mut dedup = DedupRule::default();
        for item in items {
            let decision = self.decide(&item, &mut dedup, &mut out.report);
            debug!(id = %item.id(), outcome = %decision.outcome, reasons = ?decision.reasons, "filtered");
            let filtered = FilteredItem { item, decision };
            match filtered.decision.outcome {
                FilterOutcome::AutoApproved => out.approved.push(filtered),
                FilterOutcome::NeedsReview => out.needs_review.push(filtered),
                FilterOutcome::Rejected => out.rejected.push(filtered),
            }
        }

        let report = &mut out.report;
        report.auto_approved = out.approved.len();
        report.needs_review = out.needs_review.len();
        report.rejected = out.rejected.len();
        report.output_count = report.auto_approved + report.needs_review;
        info!(
            total = report.total_items,
            approved = report.auto_approved,
            review = report.needs_review,
            rejected = report.rejected,
            "filtering finished"
        );
        out
    }

    /// Decide one item. `dedup` holds hashes of items kept so far.
    pub fn decide(
        &self,
        item: &ScoredItem,
        dedup: &mut DedupRule,
        report: &mut FilterReport,
    ) -> FilterDecision {
        if let Some(reason) = threshold_rule(item) {
            report.threshold_rejected += 1;
            return FilterDecision::rejected(vec![reason.to_string()]);
        }

        if let Some(reason) = dedup.check(item) {
            report.dedup_rejected += 1;
            return FilterDecision::rejected(vec![reason.to_string()]);
        }

        let compliance = self.compliance.check(item);
        if !compliance.is_empty() {
            report.compliance.rejected += 1;
            for reason in &compliance {
                match *reason {
                    COMPLIANCE_NSFW => report.compliance.nsfw += 1,
                    _ => report.compliance.political_sensitive += 1,
                }
            }
            return FilterDecision::rejected(compliance.into_iter().map(String::from).collect());
        }

        let missing = self.completeness.check(item);
        let incomplete = !missing.is_empty();
        if incomplete {
            report.completeness.flagged += 1;
            for m in &missing {
                *report.completeness.missing.entry(m.clone()).or_default() += 1;
            }
        }

        let review = review_reasons(item, incomplete, &self.review);
        let mut reasons = missing;
        for r in &review {
            *report.review_reasons.entry(r.key().to_string()).or_default() += 1;
            reasons.push(format!("review:{}", r.key()));
        }

        match review.first() {
            Some(first) => FilterDecision {
                outcome: FilterOutcome::NeedsReview,
                reasons,
                review_reason: Some(*first),
            },
            None => FilterDecision {
                outcome: FilterOutcome::AutoApproved,
                reasons,
                review_reason: None,
            },
        }
    }
}
