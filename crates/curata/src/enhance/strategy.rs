use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::item::QualityTier;

/// An enrichment strategy, listed in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnhancementMethod {
    WebSearch,
    LlmGeneration,
    ToolCall,
    Template,
}

impl EnhancementMethod {
    pub const ALL: [EnhancementMethod; 4] = [
        EnhancementMethod::WebSearch,
        EnhancementMethod::LlmGeneration,
        EnhancementMethod::ToolCall,
        EnhancementMethod::Template,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            EnhancementMethod::WebSearch => "web_search",
            EnhancementMethod::LlmGeneration => "llm_generation",
            EnhancementMethod::ToolCall => "tool_call",
            EnhancementMethod::Template => "template",
        }
    }
}

impl fmt::Display for EnhancementMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Output of one strategy before rescoring.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyOutput {
    pub content: String,
    pub fields_added: BTreeSet<String>,
    pub reason: String,
}

/// What enhancement did to one approved item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancementRecord {
    /// Strategy whose result was applied.
    pub method: EnhancementMethod,
    /// Strategies tried, in order, ending with `method`.
    pub attempted: Vec<EnhancementMethod>,
    pub success: bool,
    pub reason: String,
    /// Gap keys found before enhancement.
    pub gaps: Vec<String>,
    pub fields_added: BTreeSet<String>,
    pub original_total_score: f64,
    pub enhanced_total_score: f64,
    pub enhanced_quality_tier: QualityTier,
}

impl EnhancementRecord {
    pub fn improvement(&self) -> f64 {
        self.enhanced_total_score - self.original_total_score
    }
}
