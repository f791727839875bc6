//! Optional cleaning stage for scraped boilerplate.
//!
//! Runs after deduplication when `cleaning.enabled` is set. Every removed
//! item is kept in the [`Discarded`] side channel with the rule that fired.

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::CleaningConfig;
use crate::error::{CurataError, Result};
use crate::item::CandidateItem;

/// A cleaning rule, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanRule {
    EmptyContent,
    TooShort,
    TooLong,
    Navigation,
    SpecialFormat,
}

impl CleanRule {
    pub const ALL: [CleanRule; 5] = [
        CleanRule::EmptyContent,
        CleanRule::TooShort,
        CleanRule::TooLong,
        CleanRule::Navigation,
        CleanRule::SpecialFormat,
    ];

    pub fn reason(&self) -> &'static str {
        match self {
            CleanRule::EmptyContent => "clean:empty_content",
            CleanRule::TooShort => "clean:too_short",
            CleanRule::TooLong => "clean:too_long",
            CleanRule::Navigation => "clean:navigation",
            CleanRule::SpecialFormat => "clean:special_format",
        }
    }
}

/// An item removed before classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discarded {
    pub item: CandidateItem,
    pub stage: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleanReport {
    pub enabled: bool,
    pub total_items: usize,
    pub output_count: usize,
    pub removed: usize,
    pub by_rule: IndexMap<String, usize>,
}

#[derive(Debug, Clone)]
pub struct CleanOutput {
    pub items: Vec<CandidateItem>,
    pub discarded: Vec<Discarded>,
    pub report: CleanReport,
}

fn build_navigation_patterns() -> Result<Vec<Regex>> {
    let patterns = [
        r"(?i)\[skip to content\]",
        r"(?i)sign in.*sign out",
        r"(?i)profile.*notifications?",
        r"(?i)creator center",
        r"(?i)\bcopyright\b|©\s*\d{4}",
        r"(?i)privacy policy|terms of service",
        r"(?i)navigation.*menu",
        r"(?im)^.*\bhome\b.*\babout\b.*\bcontact\b.*$",
        r"(?m)^[ \t]*#+[ \t]*$",
        r"(?m)^[ \t]*[-*_]{3,}[ \t]*$",
    ];
    patterns.iter().map(|p| Regex::new(p).map_err(CurataError::from)).collect()
}

fn build_special_format_patterns() -> Result<Vec<Regex>> {
    let patterns = [
        r"(?i)^\s*loading\s*(\.\.\.|…)",
        r"(?i)^\s*\[subscribe\].*(atom|rss)\s+feed",
        r"(?i)^\s*\[random\]",
        r"(?i)^\s*<!doctype",
        r"(?i)^\s*<html",
    ];
    patterns.iter().map(|p| Regex::new(p).map_err(CurataError::from)).collect()
}

fn is_url(line: &str) -> bool {
    line.starts_with("http://") || line.starts_with("https://")
}

/// Filters empty, oversized, and boilerplate content.
pub struct Cleaner {
    enabled: bool,
    min_chars: usize,
    max_chars: usize,
    navigation: Vec<Regex>,
    special: Vec<Regex>,
}

impl Cleaner {
    pub fn new(config: &CleaningConfig) -> Result<Self> {
        Ok(Self {
            enabled: config.enabled,
            min_chars: config.min_content_chars,
            max_chars: config.max_content_chars,
            navigation: build_navigation_patterns()?,
            special: build_special_format_patterns()?,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// First rule that removes `item`, if any.
    pub fn check(&self, item: &CandidateItem) -> Option<CleanRule> {
        let content = item.content.as_str();
        if content.trim().is_empty() {
            return Some(CleanRule::EmptyContent);
        }
        let len = item.char_len();
        if len < self.min_chars {
            return Some(CleanRule::TooShort);
        }
        if len > self.max_chars {
            return Some(CleanRule::TooLong);
        }
        if self.is_navigation(content) {
            return Some(CleanRule::Navigation);
        }
        if self.is_special_format(content) {
            return Some(CleanRule::SpecialFormat);
        }
        None
    }

    fn is_navigation(&self, content: &str) -> bool {
        if self.navigation.iter().any(|re| re.is_match(content)) {
            return true;
        }
        let lines: Vec<&str> = content.split('\n').collect();
        let short = lines
            .iter()
            .filter(|l| l.trim().chars().count() < 50)
            .count();
        lines.len() > 5 && short as f64 / lines.len() as f64 > 0.7
    }

    fn is_special_format(&self, content: &str) -> bool {
        if self.special.iter().any(|re| re.is_match(content)) {
            return true;
        }
        if !is_url(content.trim_start()) {
            return false;
        }
        let lines: Vec<&str> = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let urls = lines.iter().filter(|l| is_url(l)).count();
        urls as f64 / lines.len() as f64 > 0.5
    }

    pub fn run(&self, items: Vec<CandidateItem>) -> CleanOutput {
        let total = items.len();
        let mut report = CleanReport {
            enabled: self.enabled,
            total_items: total,
            ..Default::default()
        };
        for rule in CleanRule::ALL {
            report.by_rule.insert(rule.reason().to_string(), 0);
        }

        if !self.enabled {
            report.output_count = total;
            return CleanOutput {
                items,
                discarded: Vec::new(),
                report,
            };
        }

        let mut kept = Vec::with_capacity(total);
        let mut discarded = Vec::new();
        for item in items {
            match self.check(&item) {
                Some(rule) => {
                    debug!(id = %item.id, reason = rule.reason(), "discarded during cleaning");
                    *report.by_rule.entry(rule.reason().to_string()).or_default() += 1;
                    discarded.push(Discarded {
                        item,
                        stage: "clean".to_string(),
                        reason: rule.reason().to_string(),
                    });
                }
                None => kept.push(item),
            }
        }

        report.output_count = kept.len();
        report.removed = discarded.len();
        info!(
            total = total,
            kept = report.output_count,
            removed = report.removed,
            "cleaning finished"
        );

        CleanOutput {
            items: kept,
            discarded,
            report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaner() -> Cleaner {
        Cleaner::new(&CleaningConfig {
            enabled: true,
            ..Default::default()
        })
        .unwrap()
    }

    fn check(content: &str) -> Option<CleanRule> {
        cleaner().check(&CandidateItem::new("x", content))
    }

    const GOOD: &str = "You are a data engineer. Explain how to partition a large Postgres table by month, with the tradeoffs.";

    #[test]
    fn test_keeps_normal_content() {
        assert_eq!(check(GOOD), None);
    }

    #[test]
    fn test_length_rules() {
        assert_eq!(check("   \n "), Some(CleanRule::EmptyContent));
        assert_eq!(check("too short to keep"), Some(CleanRule::TooShort));
        let long = "a".repeat(50_001);
        assert_eq!(check(&long), Some(CleanRule::TooLong));
    }

    #[test]
    fn test_navigation_chrome() {
        let page = format!("[Skip to content]\n{}", GOOD);
        assert_eq!(check(&page), Some(CleanRule::Navigation));

        let footer = format!("{} Read our Privacy Policy before posting.", GOOD);
        assert_eq!(check(&footer), Some(CleanRule::Navigation));
    }

    #[test]
    fn test_mostly_short_lines() {
        let menu = "Home\nNews\nSports\nWeather\nMarkets\nOpinion\nA much longer line that is definitely more than fifty characters long.";
        assert_eq!(check(menu), Some(CleanRule::Navigation));
    }

    #[test]
    fn test_special_formats() {
        let html = format!("<!DOCTYPE html><html>{}</html>", GOOD);
        assert_eq!(check(&html), Some(CleanRule::SpecialFormat));

        let urls = "https://example.com/a-very-long-path/one\nhttps://example.com/a-very-long-path/two\nsome trailing words here";
        assert_eq!(check(urls), Some(CleanRule::SpecialFormat));
    }

    #[test]
    fn test_disabled_cleaner_passes_everything() {
        let cleaner = Cleaner::new(&CleaningConfig::default()).unwrap();
        let out = cleaner.run(vec![CandidateItem::new("1", ""), CandidateItem::new("2", GOOD)]);
        assert_eq!(out.items.len(), 2);
        assert!(out.discarded.is_empty());
        assert!(!out.report.enabled);
    }

    #[test]
    fn test_run_reports_per_rule() {
        let out = cleaner().run(vec![
            CandidateItem::new("1", ""),
            CandidateItem::new("2", GOOD),
            CandidateItem::new("3", "short"),
        ]);
        assert_eq!(out.items.len(), 1);
        assert_eq!(out.report.removed, 2);
        assert_eq!(out.report.by_rule["clean:empty_content"], 1);
        assert_eq!(out.report.by_rule["clean:too_short"], 1);
        assert_eq!(out.discarded[0].stage, "clean");
    }
}
