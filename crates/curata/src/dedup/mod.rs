//! Exact and semantic deduplication.
//!
//! The exact pass always runs and keeps the first occurrence of each content
//! hash. The semantic pass runs only when an embedding backend is configured
//! and available, and never fails the pipeline: on any backend error it is
//! reported as `failed` and the exact-pass output is kept.

mod exact;
mod semantic;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::DedupConfig;
use crate::embedding::EmbeddingProvider;
use crate::item::CandidateItem;
use crate::retry::RetryPolicy;

/// Which pass removed an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateKind {
    Exact,
    Semantic,
}

/// A removed item and what it duplicated. Written to the side-channel log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateRecord {
    pub item: CandidateItem,
    pub kind: DuplicateKind,
    /// Id of the kept item.
    pub duplicate_of: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

impl DuplicateRecord {
    pub fn reason(&self) -> &'static str {
        match self.kind {
            DuplicateKind::Exact => "dedup:exact_duplicate",
            DuplicateKind::Semantic => "dedup:semantic_duplicate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticStatus {
    Ran,
    Skipped,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticDedupReport {
    pub status: SemanticStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    pub threshold: f64,
    pub removed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DedupReport {
    pub total_items: usize,
    pub output_count: usize,
    pub unique: usize,
    pub duplicates: usize,
    pub dedup_rate: f64,
    pub exact_duplicates: usize,
    pub semantic_dedup: SemanticDedupReport,
}

#[derive(Debug, Clone)]
pub struct DedupOutput {
    pub items: Vec<CandidateItem>,
    pub duplicates: Vec<DuplicateRecord>,
    pub report: DedupReport,
}

/// Removes exact and near duplicates, earliest occurrence wins.
#[derive(Clone)]
pub struct Deduplicator {
    threshold: f64,
    max_chars: usize,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    retry: RetryPolicy,
}

impl Deduplicator {
    pub fn new(config: &DedupConfig) -> Self {
        Self {
            threshold: config.semantic_threshold,
            max_chars: config.embedding_max_chars,
            embedder: None,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn run(&self, items: Vec<CandidateItem>) -> DedupOutput {
        let total = items.len();
        let (kept, mut duplicates) = exact::exact_pass(items);
        let exact_duplicates = duplicates.len();

        let (kept, semantic_dedup) = self.semantic(kept, &mut duplicates);

        for dup in &duplicates {
            debug!(id = %dup.item.id, duplicate_of = %dup.duplicate_of, kind = ?dup.kind, "removed duplicate");
        }

        let report = DedupReport {
            total_items: total,
            output_count: kept.len(),
            unique: kept.len(),
            duplicates: duplicates.len(),
            dedup_rate: if total == 0 {
                0.0
            } else {
                duplicates.len() as f64 / total as f64
            },
            exact_duplicates,
            semantic_dedup,
        };
        info!(
            total = report.total_items,
            unique = report.unique,
            duplicates = report.duplicates,
            semantic = ?report.semantic_dedup.status,
            "deduplication finished"
        );

        DedupOutput {
            items: kept,
            duplicates,
            report,
        }
    }

    fn semantic(
        &self,
        items: Vec<CandidateItem>,
        duplicates: &mut Vec<DuplicateRecord>,
    ) -> (Vec<CandidateItem>, SemanticDedupReport) {
        let mut report = SemanticDedupReport {
            status: SemanticStatus::Skipped,
            reason: None,
            provider: None,
            threshold: self.threshold,
            removed: 0,
        };

        let Some(embedder) = &self.embedder else {
            report.reason = Some("no embedding backend configured".to_string());
            return (items, report);
        };
        report.provider = Some(embedder.name().to_string());

        if !embedder.is_available() {
            warn!(provider = embedder.name(), "embedding backend unavailable, skipping semantic dedup");
            report.reason = Some(format!("embedding backend '{}' unavailable", embedder.name()));
            return (items, report);
        }

        match semantic::semantic_pass(
            &items,
            embedder.as_ref(),
            self.threshold,
            self.max_chars,
            &self.retry,
        ) {
            Ok((kept_idx, removed)) => {
                report.status = SemanticStatus::Ran;
                report.removed = removed.len();
                duplicates.extend(removed);
                let mut keep = vec![false; items.len()];
                for i in kept_idx {
                    keep[i] = true;
                }
                let kept = items
                    .into_iter()
                    .zip(keep)
                    .filter_map(|(item, k)| k.then_some(item))
                    .collect();
                (kept, report)
            }
            Err(e) => {
                warn!(provider = embedder.name(), error = %e, "semantic dedup failed, keeping exact-dedup output");
                report.status = SemanticStatus::Failed;
                report.reason = Some(e.to_string());
                (items, report)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashedEmbedder;
    use crate::error::{CurataError, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingEmbedder {
        calls: AtomicUsize,
    }

    impl EmbeddingProvider for FailingEmbedder {
        fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(CurataError::provider("failing", "connection refused"))
        }
        fn dimensions(&self) -> usize {
            8
        }
        fn name(&self) -> &str {
            "failing"
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    struct OfflineEmbedder;

    impl EmbeddingProvider for OfflineEmbedder {
        fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
            unreachable!("never called when unavailable")
        }
        fn dimensions(&self) -> usize {
            8
        }
        fn name(&self) -> &str {
            "offline"
        }
        fn is_available(&self) -> bool {
            false
        }
    }

    fn items() -> Vec<CandidateItem> {
        vec![
            CandidateItem::new("1", "write three taglines for a coffee brand"),
            CandidateItem::new("2", "a guide to sourdough starters"),
            CandidateItem::new("3", "write three taglines for a coffee brand"),
            CandidateItem::new("4", "for a coffee brand write three taglines"),
        ]
    }

    fn no_retry(dedup: Deduplicator) -> Deduplicator {
        dedup.with_retry(RetryPolicy::none())
    }

    #[test]
    fn test_exact_only_without_embedder() {
        let out = Deduplicator::new(&DedupConfig::default()).run(items());
        assert_eq!(out.report.total_items, 4);
        assert_eq!(out.report.duplicates, 1);
        assert_eq!(out.report.exact_duplicates, 1);
        assert_eq!(out.report.semantic_dedup.status, SemanticStatus::Skipped);
        assert_eq!(out.items.len(), 3);
        assert!((out.report.dedup_rate - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_semantic_removes_reordered_copy() {
        let dedup = no_retry(
            Deduplicator::new(&DedupConfig::default()).with_embedder(Arc::new(HashedEmbedder::default())),
        );
        let out = dedup.run(items());
        assert_eq!(out.report.semantic_dedup.status, SemanticStatus::Ran);
        assert_eq!(out.report.semantic_dedup.removed, 1);
        let ids: Vec<&str> = out.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        let semantic = out
            .duplicates
            .iter()
            .find(|d| d.kind == DuplicateKind::Semantic)
            .unwrap();
        assert_eq!(semantic.item.id, "4");
        assert_eq!(semantic.duplicate_of, "1");
        assert!(semantic.similarity.unwrap() > 0.95);
    }

    #[test]
    fn test_backend_failure_keeps_exact_output() {
        let failing = Arc::new(FailingEmbedder {
            calls: AtomicUsize::new(0),
        });
        let dedup = Deduplicator::new(&DedupConfig::default())
            .with_embedder(failing.clone())
            .with_retry(RetryPolicy {
                max_attempts: 3,
                base_delay: std::time::Duration::ZERO,
                max_delay: std::time::Duration::ZERO,
            });
        let out = dedup.run(items());
        assert_eq!(out.report.semantic_dedup.status, SemanticStatus::Failed);
        assert!(out.report.semantic_dedup.reason.as_deref().unwrap().contains("connection refused"));
        assert_eq!(out.items.len(), 3);
        assert_eq!(failing.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_unavailable_backend_is_skipped() {
        let dedup = Deduplicator::new(&DedupConfig::default()).with_embedder(Arc::new(OfflineEmbedder));
        let out = dedup.run(items());
        assert_eq!(out.report.semantic_dedup.status, SemanticStatus::Skipped);
        assert_eq!(out.report.semantic_dedup.provider.as_deref(), Some("offline"));
    }

    #[test]
    fn test_idempotent() {
        let dedup = Deduplicator::new(&DedupConfig::default()).with_embedder(Arc::new(HashedEmbedder::default()));
        let first = dedup.run(items());
        let second = dedup.run(first.items.clone());
        assert_eq!(second.report.duplicates, 0);
        assert_eq!(second.items, first.items);
    }

    #[test]
    fn test_empty_batch() {
        let out = Deduplicator::new(&DedupConfig::default()).run(Vec::new());
        assert_eq!(out.report.total_items, 0);
        assert_eq!(out.report.dedup_rate, 0.0);
    }
}
