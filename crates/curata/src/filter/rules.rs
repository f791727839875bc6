//! The four filter rules, applied in a fixed order.

use std::collections::HashSet;

use regex::Regex;

use crate::config::ComplianceConfig;
use crate::error::Result;
use crate::item::{ContentType, QualityTier, ScoredItem};

pub const THRESHOLD_LOW_QUALITY: &str = "threshold:low_quality";
pub const DEDUP_EXACT: &str = "dedup:exact_duplicate";
pub const COMPLIANCE_NSFW: &str = "compliance:NSFW";
pub const COMPLIANCE_POLITICAL: &str = "compliance:political_sensitive";

/// Rule 1: low tier is rejected.
pub fn threshold_rule(item: &ScoredItem) -> Option<&'static str> {
    (item.quality_tier == QualityTier::Low).then_some(THRESHOLD_LOW_QUALITY)
}

/// Rule 2: content hash already seen among kept items.
#[derive(Default)]
pub struct DedupRule {
    seen: HashSet<String>,
}

impl DedupRule {
    /// Records the item's hash; returns the reason if it was already kept.
    pub fn check(&mut self, item: &ScoredItem) -> Option<&'static str> {
        let hash = item.classified.candidate.content_hash();
        if self.seen.insert(hash) {
            None
        } else {
            Some(DEDUP_EXACT)
        }
    }
}

/// Rule 3: case-insensitive substring match over title and content.
pub struct ComplianceRule {
    nsfw: Vec<String>,
    political: Vec<String>,
}

impl ComplianceRule {
    pub fn new(config: &ComplianceConfig) -> Self {
        let lower = |list: &[String]| -> Vec<String> {
            list.iter()
                .map(|k| k.to_lowercase())
                .filter(|k| !k.is_empty())
                .collect()
        };
        Self {
            nsfw: lower(&config.nsfw_keywords),
            political: lower(&config.political_keywords),
        }
    }

    /// Reasons for every list that matched, NSFW first. Both are emitted
    /// when both lists match, so the report counts each list.
    pub fn check(&self, item: &ScoredItem) -> Vec<&'static str> {
        let text = format!("{} {}", item.title(), item.content()).to_lowercase();
        let mut reasons = Vec::new();
        if self.nsfw.iter().any(|k| text.contains(k.as_str())) {
            reasons.push(COMPLIANCE_NSFW);
        }
        if self.political.iter().any(|k| text.contains(k.as_str())) {
            reasons.push(COMPLIANCE_POLITICAL);
        }
        reasons
    }
}

/// Rule 4: universal and type-specific structure. Flags, never rejects.
pub struct CompletenessRule {
    task_keyword: Regex,
    step_keyword: Regex,
}

impl CompletenessRule {
    pub fn new() -> Result<Self> {
        Ok(Self {
            task_keyword: Regex::new(
                r"(?i)\b(write|create|generate|draft|list|summari[sz]e|explain|produce|design|translate|rewrite|provide|compose|analy[sz]e|give|make)\b|请|生成|创建",
            )?,
            step_keyword: Regex::new(r"(?i)\bsteps?\b|步骤")?,
        })
    }

    /// Missing-field reasons, empty when complete.
    pub fn check(&self, item: &ScoredItem) -> Vec<String> {
        let mut missing = Vec::new();
        let content = item.content();
        let features = &item.classified.features;

        if content.trim().chars().count() <= 10 {
            missing.push("completeness:missing_content".to_string());
        }
        if item.title().trim().is_empty() {
            missing.push("completeness:missing_title".to_string());
        }

        let structured = match item.content_type() {
            ContentType::Prompt => self.task_keyword.is_match(content),
            ContentType::Workflow => {
                features.has_numbered_steps || self.step_keyword.is_match(content)
            }
            ContentType::Guide => features.has_headings,
            ContentType::IndustryKnowledge => true,
        };
        if !structured {
            missing.push(format!(
                "completeness:missing_{}_structure",
                item.content_type().key()
            ));
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;
    use crate::config::{ClassifierConfig, ScoringConfig};
    use crate::item::CandidateItem;
    use crate::score::Scorer;

    fn scored(title: &str, content: &str) -> ScoredItem {
        let classifier = Classifier::new(&ClassifierConfig::default()).unwrap();
        let scorer = Scorer::new(&ScoringConfig::default()).unwrap();
        scorer.score(classifier.classify(CandidateItem::new("c", content).with_title(title)))
    }

    #[test]
    fn test_compliance_emits_every_matching_list() {
        let rule = ComplianceRule::new(&ComplianceConfig::default());
        let item = scored("NSFW picks", "Write a post about election fraud.");
        assert_eq!(rule.check(&item), vec![COMPLIANCE_NSFW, COMPLIANCE_POLITICAL]);
    }

    #[test]
    fn test_compliance_is_case_insensitive() {
        let rule = ComplianceRule::new(&ComplianceConfig::default());
        assert_eq!(rule.check(&scored("", "Keep it Nsfw")), vec![COMPLIANCE_NSFW]);
        assert!(rule.check(&scored("Copy prompt", "Write 3 taglines")).is_empty());
    }
}
