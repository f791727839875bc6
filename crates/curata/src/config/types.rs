use serde::{Deserialize, Serialize};

use crate::item::ContentType;

/// Root configuration for a pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub dedup: DedupConfig,
    #[serde(default)]
    pub cleaning: CleaningConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub review: ReviewConfig,
    #[serde(default)]
    pub compliance: ComplianceConfig,
    #[serde(default)]
    pub enhance: EnhanceConfig,
    #[serde(default)]
    pub retry: RetryConfig,
}

impl PipelineConfig {
    /// Validate this configuration, see [`super::validate_config`].
    pub fn validate(&self) -> crate::Result<()> {
        super::validate_config(self)
    }
}

/// Deduplication settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DedupConfig {
    /// Cosine similarity above which a later item is a semantic duplicate.
    #[serde(default = "default_semantic_threshold")]
    pub semantic_threshold: f64,
    /// Content is truncated to this many characters before embedding.
    #[serde(default = "default_embedding_max_chars")]
    pub embedding_max_chars: usize,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            semantic_threshold: default_semantic_threshold(),
            embedding_max_chars: default_embedding_max_chars(),
        }
    }
}

fn default_semantic_threshold() -> f64 {
    0.95
}

fn default_embedding_max_chars() -> usize {
    512
}

/// Optional pre-classification cleaning stage.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CleaningConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_clean_min_chars")]
    pub min_content_chars: usize,
    #[serde(default = "default_clean_max_chars")]
    pub max_content_chars: usize,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            min_content_chars: default_clean_min_chars(),
            max_content_chars: default_clean_max_chars(),
        }
    }
}

fn default_clean_min_chars() -> usize {
    50
}

fn default_clean_max_chars() -> usize {
    50_000
}

/// Classifier settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClassifierConfig {
    /// Rule matches below this confidence fall through to the fallback.
    #[serde(default = "default_min_confidence")]
    pub min_rule_confidence: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_rule_confidence: default_min_confidence(),
        }
    }
}

fn default_min_confidence() -> f64 {
    0.7
}

/// Scoring settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub thresholds: ScoreThresholds,
}

/// Per-type score thresholds for the `high` tier.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScoreThresholds {
    #[serde(default = "default_prompt_threshold")]
    pub prompt: u32,
    #[serde(default = "default_workflow_threshold")]
    pub workflow: u32,
    #[serde(default = "default_industry_threshold")]
    pub industry_knowledge: u32,
    #[serde(default = "default_guide_threshold")]
    pub guide: u32,
}

impl ScoreThresholds {
    /// Threshold for a content type.
    pub fn for_type(&self, content_type: ContentType) -> f64 {
        let value = match content_type {
            ContentType::Prompt => self.prompt,
            ContentType::Workflow => self.workflow,
            ContentType::IndustryKnowledge => self.industry_knowledge,
            ContentType::Guide => self.guide,
        };
        f64::from(value)
    }
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            prompt: default_prompt_threshold(),
            workflow: default_workflow_threshold(),
            industry_knowledge: default_industry_threshold(),
            guide: default_guide_threshold(),
        }
    }
}

fn default_prompt_threshold() -> u32 {
    70
}

fn default_workflow_threshold() -> u32 {
    65
}

fn default_industry_threshold() -> u32 {
    70
}

fn default_guide_threshold() -> u32 {
    75
}

/// Review routing settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReviewConfig {
    /// Items with validated confidence below this go to review.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
    #[serde(default = "default_review_min_chars")]
    pub content_min_chars: usize,
    #[serde(default = "default_review_max_chars")]
    pub content_max_chars: usize,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            min_confidence: default_min_confidence(),
            content_min_chars: default_review_min_chars(),
            content_max_chars: default_review_max_chars(),
        }
    }
}

fn default_review_min_chars() -> usize {
    50
}

fn default_review_max_chars() -> usize {
    2000
}

/// Keyword lists for the compliance rule. Matching is a case-insensitive
/// substring test over title and content.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ComplianceConfig {
    #[serde(default = "default_nsfw_keywords")]
    pub nsfw_keywords: Vec<String>,
    #[serde(default = "default_political_keywords")]
    pub political_keywords: Vec<String>,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            nsfw_keywords: default_nsfw_keywords(),
            political_keywords: default_political_keywords(),
        }
    }
}

fn default_nsfw_keywords() -> Vec<String> {
    ["nsfw", "porn", "xxx", "explicit sexual", "adult content", "色情"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_political_keywords() -> Vec<String> {
    ["政治", "terrorism", "propaganda", "extremist", "election fraud"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Enhancement settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EnhanceConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Maximum score gain per added field.
    #[serde(default = "default_boost_per_field")]
    pub boost_per_field: f64,
    /// Content shorter than this has a `details` gap.
    #[serde(default = "default_enhance_min_chars")]
    pub min_content_chars: usize,
    /// How many search results to fold into the enhanced content.
    #[serde(default = "default_search_results")]
    pub search_results: usize,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            boost_per_field: default_boost_per_field(),
            min_content_chars: default_enhance_min_chars(),
            search_results: default_search_results(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_boost_per_field() -> f64 {
    5.0
}

fn default_enhance_min_chars() -> usize {
    300
}

fn default_search_results() -> usize {
    3
}

/// Retry settings for external calls.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    200
}

fn default_max_delay_ms() -> u64 {
    2000
}
