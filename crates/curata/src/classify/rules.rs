//! Prioritized classification rules.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::item::{ContentType, Features};

/// A rule that fired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleMatch {
    pub content_type: ContentType,
    pub confidence: f64,
    pub rule: String,
    pub reason: String,
}

/// No rule reached the minimum confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct LowConfidence {
    /// Strongest rule that fired below the bar, if any did.
    pub best: Option<RuleMatch>,
}

enum RuleTest {
    Pattern(Regex),
    /// Keyword count per type times 0.3; fires when the best exceeds 0.6.
    KeywordDensity,
}

struct Rule {
    name: &'static str,
    content_type: Option<ContentType>,
    confidence: f64,
    reason: &'static str,
    test: RuleTest,
}

fn build_rules() -> Result<Vec<Rule>> {
    let rule = |name, content_type, confidence, reason, pattern: &str| -> Result<Rule> {
        Ok(Rule {
            name,
            content_type: Some(content_type),
            confidence,
            reason,
            test: RuleTest::Pattern(Regex::new(pattern)?),
        })
    };

    Ok(vec![
        rule(
            "role_assignment",
            ContentType::Prompt,
            0.95,
            "role assignment followed by a task request",
            r"(?is)(你是一个|你是一名|扮演|\byou are (a|an|the)\b|\bact as\b|\bpretend to be\b).*(请|生成|创建|写|\bwrite\b|\bcreate\b|\bgenerate\b|\bdraft\b|\blist\b|\bsummari[sz]e\b|\bexplain\b|\bproduce\b|\bdesign\b|\bprovide\b|\bgive\b|\bhelp\b)",
        )?,
        rule(
            "sequential_steps",
            ContentType::Workflow,
            0.90,
            "three or more sequential step markers",
            r"(?is)(第一步.*第二步.*第三步|\bstep[ \t]*1\b.*\bstep[ \t]*2\b.*\bstep[ \t]*3\b)",
        )?,
        rule(
            "numbered_experience",
            ContentType::IndustryKnowledge,
            0.85,
            "numbered list of lessons or best practices",
            r"(?is)((经验|最佳实践|优化).*\d+.*条|\b\d+\s+(best practices|lessons learned|lessons|tips|mistakes|insights|rules of thumb)\b)",
        )?,
        rule(
            "guide_keywords",
            ContentType::Guide,
            0.80,
            "guide or tutorial phrasing",
            r"(?i)(指南|教程|方法|\bguide\b|\btutorial\b|\bhow to\b|\bwalkthrough\b|\bgetting started\b)",
        )?,
        Rule {
            name: "keyword_density",
            content_type: None,
            confidence: 0.0,
            reason: "keyword density",
            test: RuleTest::KeywordDensity,
        },
    ])
}

/// The ordered rule list. The first rule at or above the minimum
/// confidence wins.
pub struct RuleSet {
    rules: Vec<Rule>,
    min_confidence: f64,
}

impl RuleSet {
    pub fn new(min_confidence: f64) -> Result<Self> {
        Ok(Self {
            rules: build_rules()?,
            min_confidence,
        })
    }

    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }

    pub fn evaluate(
        &self,
        content: &str,
        features: &Features,
    ) -> std::result::Result<RuleMatch, LowConfidence> {
        let mut best: Option<RuleMatch> = None;

        for rule in &self.rules {
            let Some(candidate) = Self::apply(rule, content, features) else {
                continue;
            };
            if candidate.confidence >= self.min_confidence {
                return Ok(candidate);
            }
            if best
                .as_ref()
                .is_none_or(|b| candidate.confidence > b.confidence)
            {
                best = Some(candidate);
            }
        }

        Err(LowConfidence { best })
    }

    fn apply(rule: &Rule, content: &str, features: &Features) -> Option<RuleMatch> {
        match &rule.test {
            RuleTest::Pattern(re) => {
                let content_type = rule.content_type?;
                re.is_match(content).then(|| RuleMatch {
                    content_type,
                    confidence: rule.confidence,
                    rule: rule.name.to_string(),
                    reason: rule.reason.to_string(),
                })
            }
            RuleTest::KeywordDensity => {
                let (content_type, count) = ContentType::ALL
                    .iter()
                    .map(|t| (*t, features.keyword_count(*t)))
                    .fold(None, |acc: Option<(ContentType, u32)>, (t, c)| match acc {
                        Some((_, best)) if best >= c => acc,
                        _ => Some((t, c)),
                    })?;
                let density = f64::from(count) * 0.3;
                if density <= 0.6 {
                    return None;
                }
                Some(RuleMatch {
                    content_type,
                    confidence: (0.6 + density * 0.3).min(0.9),
                    rule: rule.name.to_string(),
                    reason: format!("{} {} keywords", count, content_type.key()),
                })
            }
        }
    }
}
