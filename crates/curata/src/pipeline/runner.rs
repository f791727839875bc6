use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::embedding::EmbeddingProvider;
use crate::enhance::{SearchProvider, StructureTool};
use crate::error::Result;
use crate::input::{ReadReport, RecordReader, RecordWriter, write_report};
use crate::item::CandidateItem;
use crate::llm::LlmProvider;

use super::context::PipelineContext;
use super::report::{PipelineOutput, PipelineReport, PipelineTotals};

/// File names written by [`Pipeline::write_outputs`].
pub const APPROVED_FILE: &str = "approved.jsonl";
pub const NEEDS_REVIEW_FILE: &str = "needs-review.jsonl";
pub const REJECTED_FILE: &str = "rejected.jsonl";
pub const DUPLICATES_FILE: &str = "duplicates.jsonl";
pub const DISCARDED_FILE: &str = "discarded.jsonl";
pub const REPORT_FILE: &str = "report.json";

/// Dedup → Clean → Classify → Score → Filter → Enhance.
pub struct Pipeline {
    context: PipelineContext,
}

impl Pipeline {
    /// Create a pipeline. Invalid configuration fails here.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        Ok(Self {
            context: PipelineContext::new(config)?,
        })
    }

    /// Enable semantic deduplication with an embedding backend.
    pub fn with_embedder(mut self, embedder: impl EmbeddingProvider + 'static) -> Self {
        self.context.dedup = self.context.dedup.with_embedder(Arc::new(embedder));
        self
    }

    /// Add an LLM provider for enhancement.
    pub fn with_llm(mut self, provider: impl LlmProvider + 'static) -> Self {
        self.context.enhancer = self.context.enhancer.with_llm(Arc::new(provider));
        self
    }

    /// Add a web search backend for enhancement.
    pub fn with_search(mut self, search: impl SearchProvider + 'static) -> Self {
        self.context.enhancer = self.context.enhancer.with_search(Arc::new(search));
        self
    }

    /// Replace the structuring tool used for heading and step gaps.
    pub fn with_tool(mut self, tool: impl StructureTool + 'static) -> Self {
        self.context.enhancer = self.context.enhancer.with_tool(Arc::new(tool));
        self
    }

    pub fn context(&self) -> &PipelineContext {
        &self.context
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.context.config
    }

    /// Run every stage over a batch. External failures degrade stages but
    /// never fail the run.
    pub fn run(&self, items: Vec<CandidateItem>) -> PipelineOutput {
        self.run_with_input(items, None)
    }

    /// Read an NDJSON file and run it. Only I/O on the file itself fails.
    pub fn run_file(&self, path: impl AsRef<Path>) -> Result<PipelineOutput> {
        let (items, read) = RecordReader::open(path)?.read_candidates()?;
        if read.skipped > 0 {
            warn!(skipped = read.skipped, "malformed records were skipped");
        }
        Ok(self.run_with_input(items, Some(read)))
    }

    fn run_with_input(&self, items: Vec<CandidateItem>, input: Option<ReadReport>) -> PipelineOutput {
        let ctx = &self.context;
        let started_at = Utc::now();
        let total_items = items.len();
        info!(total = total_items, "pipeline started");

        let dedup = ctx.dedup.run(items);
        let cleaned = ctx.cleaner.run(dedup.items);
        let (classified, classification) = ctx.classifier.classify_batch(cleaned.items);
        let (scored, scoring) = ctx.scorer.score_batch(classified);
        let filtered = ctx.filter.run(scored);
        let (approved, enhancement) = ctx.enhancer.run(filtered.approved, &ctx.scorer);

        let totals = PipelineTotals::new(
            total_items,
            approved.len(),
            filtered.needs_review.len(),
            filtered.rejected.len(),
            dedup.duplicates.len(),
            cleaned.discarded.len(),
        );
        if !totals.balanced {
            warn!(?totals, "pipeline totals do not balance");
        }
        info!(
            total = totals.total_items,
            approved = totals.auto_approved,
            review = totals.needs_review,
            rejected = totals.rejected,
            duplicates = totals.duplicates,
            discarded = totals.discarded,
            "pipeline finished"
        );

        PipelineOutput {
            approved,
            needs_review: filtered.needs_review,
            rejected: filtered.rejected,
            duplicates: dedup.duplicates,
            discarded: cleaned.discarded,
            report: PipelineReport {
                started_at,
                finished_at: Utc::now(),
                input,
                dedup: dedup.report,
                cleaning: cleaned.report,
                classification,
                scoring,
                filter: filtered.report,
                enhancement,
                totals,
            },
        }
    }

    /// Write each partition and the report into `dir`, replacing old files.
    pub fn write_outputs(output: &PipelineOutput, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        write_partition(&dir.join(APPROVED_FILE), &output.approved)?;
        write_partition(&dir.join(NEEDS_REVIEW_FILE), &output.needs_review)?;
        write_partition(&dir.join(REJECTED_FILE), &output.rejected)?;
        write_partition(&dir.join(DUPLICATES_FILE), &output.duplicates)?;
        write_partition(&dir.join(DISCARDED_FILE), &output.discarded)?;
        write_report(dir.join(REPORT_FILE), &output.report)
    }
}

fn write_partition<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let mut writer = RecordWriter::create(path)?;
    writer.write_all(records)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_batch() {
        let out = Pipeline::new(PipelineConfig::default()).unwrap().run(Vec::new());
        assert!(out.approved.is_empty());
        assert_eq!(out.report.totals.total_items, 0);
        assert!(out.report.totals.balanced);
    }

    #[test]
    fn test_duplicates_are_accounted() {
        let content = "You are a senior copywriter. Write 3 taglines for a coffee brand.";
        let out = Pipeline::new(PipelineConfig::default()).unwrap().run(vec![
            CandidateItem::new("1", content).with_title("Copy prompt"),
            CandidateItem::new("2", content).with_title("Copy prompt"),
        ]);
        assert_eq!(out.duplicates.len(), 1);
        assert_eq!(out.approved.len(), 1);
        assert!(out.report.totals.balanced);
    }
}
