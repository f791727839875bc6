//! Content enhancement for approved items.
//!
//! Each item gets exactly one strategy's result, picked by gap class:
//!
//! | gaps        | chain                                        |
//! |-------------|----------------------------------------------|
//! | supporting  | web search → LLM → tool (if structural) → template |
//! | structural  | tool → template                              |
//! | none        | template                                     |
//!
//! Unconfigured strategies are skipped; failing ones are logged and the
//! chain moves on. The template never fails. The rescored total is clamped
//! to `[original, min(100, original + boost_per_field × fields_added)]`, so
//! an item's tier cannot drop.

mod gaps;
mod search;
mod strategy;
mod template;
mod tool;

pub use gaps::GapReport;
pub use search::{MockSearchProvider, SearchProvider, SearchResult, SearxngProvider};
pub use strategy::{EnhancementMethod, EnhancementRecord, StrategyOutput};
pub use template::apply_template;
pub use tool::{SectionOutliner, StructureTool};

use std::collections::BTreeSet;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::EnhanceConfig;
use crate::error::{CurataError, Result};
use crate::filter::FilteredItem;
use crate::item::{Features, QualityTier, ScoredItem};
use crate::llm::{GenerationRequest, LlmProvider};
use crate::retry::{RetryPolicy, with_retry};
use crate::score::Scorer;

/// An approved item with its optional enhancement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuratedItem {
    #[serde(flatten)]
    pub filtered: FilteredItem,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhanced_content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhancement: Option<EnhancementRecord>,
}

impl CuratedItem {
    fn unenhanced(filtered: FilteredItem) -> Self {
        Self {
            filtered,
            enhanced_content: None,
            enhancement: None,
        }
    }

    pub fn id(&self) -> &str {
        self.filtered.item.id()
    }

    /// Tier after enhancement, or the scored tier without one.
    pub fn final_tier(&self) -> QualityTier {
        self.enhancement
            .as_ref()
            .map(|e| e.enhanced_quality_tier)
            .unwrap_or(self.filtered.item.quality_tier)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnhancementReport {
    pub enabled: bool,
    pub total_items: usize,
    pub output_count: usize,
    pub successfully_enhanced: usize,
    pub methods_used: IndexMap<String, usize>,
    pub items_improved: usize,
    pub average_improvement: f64,
}

/// Fills gaps in approved items and rescores them.
pub struct Enhancer {
    config: EnhanceConfig,
    search: Option<Arc<dyn SearchProvider>>,
    llm: Option<Arc<dyn LlmProvider>>,
    tool: Option<Arc<dyn StructureTool>>,
    retry: RetryPolicy,
}

impl Enhancer {
    /// An enhancer with the local [`SectionOutliner`] and no remote
    /// collaborators.
    pub fn new(config: &EnhanceConfig) -> Self {
        Self {
            config: config.clone(),
            search: None,
            llm: None,
            tool: Some(Arc::new(SectionOutliner)),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_search(mut self, search: Arc<dyn SearchProvider>) -> Self {
        self.search = Some(search);
        self
    }

    pub fn with_llm(mut self, llm: Arc<dyn LlmProvider>) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn with_tool(mut self, tool: Arc<dyn StructureTool>) -> Self {
        self.tool = Some(tool);
        self
    }

    pub fn without_tool(mut self) -> Self {
        self.tool = None;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Enhance one item: returns the new content and what was done.
    pub fn enhance(&self, item: &ScoredItem, scorer: &Scorer) -> (String, EnhancementRecord) {
        let content_type = item.content_type();
        let features = &item.classified.features;
        let gaps = GapReport::analyze(content_type, features, self.config.min_content_chars);

        let mut attempted = Vec::new();
        let mut failures = Vec::new();
        let mut applied: Option<(EnhancementMethod, StrategyOutput)> = None;

        let mut attempt = |method: EnhancementMethod, result: Result<StrategyOutput>| {
            attempted.push(method);
            match result {
                Ok(out) => Some((method, out)),
                Err(e) => {
                    warn!(id = %item.id(), method = %method, error = %e, "enhancement strategy failed");
                    failures.push(format!("{} failed: {}", method, e));
                    None
                }
            }
        };

        if gaps.has_supporting() {
            if let Some(search) = &self.search {
                applied = attempt(
                    EnhancementMethod::WebSearch,
                    self.try_search(search.as_ref(), item, &gaps),
                );
            }
            if applied.is_none() {
                if let Some(llm) = &self.llm {
                    applied = attempt(
                        EnhancementMethod::LlmGeneration,
                        self.try_llm(llm.as_ref(), item, &gaps),
                    );
                }
            }
        }
        if applied.is_none() && gaps.has_structural() {
            if let Some(tool) = &self.tool {
                applied = attempt(
                    EnhancementMethod::ToolCall,
                    tool.restructure(content_type, item.title(), item.content(), &gaps),
                );
            }
        }
        let (method, output) = match applied {
            Some(found) => found,
            None => {
                attempted.push(EnhancementMethod::Template);
                (
                    EnhancementMethod::Template,
                    apply_template(content_type, item.content(), features, &gaps),
                )
            }
        };

        let original = item.total_score;
        let enhanced_total = self.rescore(item, scorer, &output);
        let enhanced_quality_tier = QualityTier::from_score(enhanced_total, item.threshold);

        let mut reason = output.reason.clone();
        if !failures.is_empty() {
            reason = format!("{} (after {})", reason, failures.join("; "));
        }

        debug!(
            id = %item.id(),
            method = %method,
            original,
            enhanced = enhanced_total,
            "enhanced"
        );

        let record = EnhancementRecord {
            method,
            attempted,
            success: output.content != item.content(),
            reason,
            gaps: gaps.missing().into_iter().map(String::from).collect(),
            fields_added: output.fields_added,
            original_total_score: original,
            enhanced_total_score: enhanced_total,
            enhanced_quality_tier,
        };
        (output.content, record)
    }

    /// Rescore enhanced content within the additive bound.
    fn rescore(&self, item: &ScoredItem, scorer: &Scorer, output: &StrategyOutput) -> f64 {
        let original = item.total_score;
        let features = Features::extract(&output.content);
        let (_, rescored) = scorer.evaluate(item.content_type(), &output.content, &features);
        let ceiling = (original + self.config.boost_per_field * output.fields_added.len() as f64)
            .min(100.0)
            .max(original);
        rescored.clamp(original, ceiling)
    }

    fn try_search(
        &self,
        search: &dyn SearchProvider,
        item: &ScoredItem,
        gaps: &GapReport,
    ) -> Result<StrategyOutput> {
        let query = search_query(item);
        let results = with_retry(&self.retry, "web search", || {
            search.search(&query, self.config.search_results)
        })?;
        if results.is_empty() {
            return Err(CurataError::provider(search.name(), "no results"));
        }

        let mut content = item.content().trim_end().to_string();
        content.push_str("\n\n## References\n");
        for r in &results {
            content.push_str(&format!("\n- [{}]({})", r.title, r.url));
            if !r.snippet.trim().is_empty() {
                content.push_str(&format!(": {}", r.snippet.trim()));
            }
        }

        let mut fields_added = BTreeSet::from(["references".to_string()]);
        if gaps.details {
            fields_added.insert("details".to_string());
        }
        Ok(StrategyOutput {
            content,
            fields_added,
            reason: format!("added {} search results from {}", results.len(), search.name()),
        })
    }

    fn try_llm(
        &self,
        llm: &dyn LlmProvider,
        item: &ScoredItem,
        gaps: &GapReport,
    ) -> Result<StrategyOutput> {
        let requested = gaps.supporting();
        let request = GenerationRequest {
            content_type: item.content_type(),
            title: item.title().to_string(),
            content: item.content().to_string(),
            gaps: requested.iter().map(|g| g.to_string()).collect(),
        };
        let generated = with_retry(&self.retry, "llm generation", || {
            llm.generate_enhancement(&request)
        })?;

        // Only count gaps that were actually asked for.
        let fields_added: BTreeSet<String> = generated
            .fields_added
            .into_iter()
            .filter(|f| requested.contains(&f.as_str()))
            .collect();
        let additions = generated.additions.trim();
        if additions.is_empty() || fields_added.is_empty() {
            return Err(CurataError::provider(llm.name(), "generated nothing usable"));
        }

        Ok(StrategyOutput {
            content: format!("{}\n\n{}", item.content().trim_end(), additions),
            reason: format!(
                "{} generated {}",
                llm.name(),
                fields_added.iter().cloned().collect::<Vec<_>>().join(", ")
            ),
            fields_added,
        })
    }

    pub fn run(&self, items: Vec<FilteredItem>, scorer: &Scorer) -> (Vec<CuratedItem>, EnhancementReport) {
        let mut report = EnhancementReport {
            enabled: self.config.enabled,
            total_items: items.len(),
            ..Default::default()
        };
        for m in EnhancementMethod::ALL {
            report.methods_used.insert(m.key().to_string(), 0);
        }

        if !self.config.enabled {
            let curated: Vec<CuratedItem> = items.into_iter().map(CuratedItem::unenhanced).collect();
            report.output_count = curated.len();
            return (curated, report);
        }

        let mut improvement = 0.0;
        let curated: Vec<CuratedItem> = items
            .into_iter()
            .map(|filtered| {
                let (content, record) = self.enhance(&filtered.item, scorer);
                *report
                    .methods_used
                    .entry(record.method.key().to_string())
                    .or_default() += 1;
                if record.success {
                    report.successfully_enhanced += 1;
                }
                if record.improvement() > 0.0 {
                    report.items_improved += 1;
                    improvement += record.improvement();
                }
                CuratedItem {
                    filtered,
                    enhanced_content: Some(content),
                    enhancement: Some(record),
                }
            })
            .collect();

        report.output_count = curated.len();
        report.average_improvement = if report.successfully_enhanced == 0 {
            0.0
        } else {
            improvement / report.successfully_enhanced as f64
        };
        info!(
            total = report.total_items,
            enhanced = report.successfully_enhanced,
            improved = report.items_improved,
            "enhancement finished"
        );
        (curated, report)
    }
}

/// Title when present, else the opening words of the content.
fn search_query(item: &ScoredItem) -> String {
    let base = if item.title().trim().is_empty() {
        item.content()
            .split_whitespace()
            .take(12)
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        item.title().trim().to_string()
    };
    format!("{} {}", base, item.content_type().key().replace('_', " "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;
    use crate::config::{ClassifierConfig, PipelineConfig};
    use crate::filter::QualityFilter;
    use crate::item::CandidateItem;
    use crate::llm::MockProvider;

    const COPY_PROMPT: &str = "You are a senior copywriter. Write 3 taglines for a coffee brand.";

    fn scorer() -> Scorer {
        Scorer::new(&Default::default()).unwrap()
    }

    fn approved(content: &str) -> FilteredItem {
        let classifier = Classifier::new(&ClassifierConfig::default()).unwrap();
        let scored = scorer().score(
            classifier.classify(CandidateItem::new("1", content).with_title("Copy prompt")),
        );
        let mut out = QualityFilter::new(&PipelineConfig::default())
            .unwrap()
            .run(vec![scored]);
        out.approved.pop().unwrap()
    }

    fn enhancer() -> Enhancer {
        Enhancer::new(&EnhanceConfig::default()).with_retry(RetryPolicy::none())
    }

    fn hit() -> SearchResult {
        SearchResult {
            title: "Tagline formulas".to_string(),
            url: "https://example.com/taglines".to_string(),
            snippet: "Short, concrete, benefit-led.".to_string(),
        }
    }

    #[test]
    fn test_search_wins_for_supporting_gaps() {
        let item = approved(COPY_PROMPT);
        let e = enhancer()
            .with_search(Arc::new(MockSearchProvider::new(vec![hit()])))
            .with_llm(Arc::new(MockProvider::new()));
        let (content, record) = e.enhance(&item.item, &scorer());
        assert_eq!(record.method, EnhancementMethod::WebSearch);
        assert_eq!(record.attempted, vec![EnhancementMethod::WebSearch]);
        assert!(content.contains("## References"));
        assert!(content.starts_with(COPY_PROMPT));
    }

    #[test]
    fn test_llm_used_when_search_fails() {
        let item = approved(COPY_PROMPT);
        let e = enhancer()
            .with_search(Arc::new(MockSearchProvider::failing()))
            .with_llm(Arc::new(MockProvider::new()));
        let (content, record) = e.enhance(&item.item, &scorer());
        assert_eq!(record.method, EnhancementMethod::LlmGeneration);
        assert_eq!(
            record.attempted,
            vec![EnhancementMethod::WebSearch, EnhancementMethod::LlmGeneration]
        );
        assert!(content.contains("For example"));
        assert!(record.reason.contains("web_search failed"));
    }

    #[test]
    fn test_empty_search_falls_through() {
        let item = approved(COPY_PROMPT);
        let e = enhancer().with_search(Arc::new(MockSearchProvider::new(Vec::new())));
        let (_, record) = e.enhance(&item.item, &scorer());
        assert_eq!(record.method, EnhancementMethod::ToolCall);
    }

    #[test]
    fn test_template_when_everything_fails() {
        let item = approved(COPY_PROMPT);
        let e = enhancer()
            .without_tool()
            .with_llm(Arc::new(MockProvider::failing()));
        let (content, record) = e.enhance(&item.item, &scorer());
        assert_eq!(record.method, EnhancementMethod::Template);
        assert_eq!(
            record.attempted,
            vec![EnhancementMethod::LlmGeneration, EnhancementMethod::Template]
        );
        assert!(content.contains("## Output Requirements"));
    }

    #[test]
    fn test_score_never_regresses_and_is_bounded() {
        let item = approved(COPY_PROMPT);
        let e = enhancer().with_llm(Arc::new(MockProvider::new()));
        let (_, record) = e.enhance(&item.item, &scorer());
        assert!(record.enhanced_total_score >= record.original_total_score);
        let bound = record.original_total_score
            + EnhanceConfig::default().boost_per_field * record.fields_added.len() as f64;
        assert!(record.enhanced_total_score <= bound.min(100.0));
        assert!(record.enhanced_quality_tier >= item.item.quality_tier);
    }

    #[test]
    fn test_run_reports_methods() {
        let (curated, report) = enhancer().run(vec![approved(COPY_PROMPT)], &scorer());
        assert_eq!(curated.len(), 1);
        assert!(curated[0].enhanced_content.is_some());
        assert_eq!(report.total_items, 1);
        assert_eq!(report.output_count, 1);
        assert_eq!(report.methods_used["tool_call"], 1);
        assert_eq!(report.successfully_enhanced, 1);
    }

    #[test]
    fn test_disabled_leaves_items_untouched() {
        let config = EnhanceConfig {
            enabled: false,
            ..Default::default()
        };
        let (curated, report) = Enhancer::new(&config).run(vec![approved(COPY_PROMPT)], &scorer());
        assert!(curated[0].enhancement.is_none());
        assert_eq!(curated[0].final_tier(), QualityTier::High);
        assert_eq!(report.successfully_enhanced, 0);
        assert!(!report.enabled);
    }
}
