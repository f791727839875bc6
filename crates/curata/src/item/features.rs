use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::classify::keywords;

static STEP_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)(第[一二三四五六七八九十0-9]+步|\bstep[ \t]*[0-9]+\b|^[ \t]*[0-9]+[.)、][ \t]*\S)")
        .expect("step marker pattern is valid")
});

static BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*[-*•][ \t]+\S").expect("bullet pattern is valid"));

static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]+\S").expect("heading pattern is valid"));

static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?。！？]+").expect("sentence pattern is valid"));

/// Structural signals extracted once per item and reused by every later stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    /// Length in characters.
    pub content_length: usize,
    pub word_count: usize,
    /// Non-blank lines.
    pub line_count: usize,
    pub sentence_count: usize,
    pub has_code_block: bool,
    pub has_numbered_steps: bool,
    pub step_marker_count: usize,
    pub has_bullets: bool,
    pub has_numbers: bool,
    pub has_headings: bool,
    pub has_example: bool,
    pub has_caution: bool,
    pub prompt_keywords: u32,
    pub workflow_keywords: u32,
    pub industry_keywords: u32,
    pub guide_keywords: u32,
}

impl Features {
    /// Extract features from raw content.
    pub fn extract(content: &str) -> Self {
        let lowered = content.to_lowercase();
        let step_marker_count = STEP_MARKER.find_iter(content).count();
        let sentence_count = SENTENCE_END
            .split(content)
            .filter(|s| !s.trim().is_empty())
            .count();

        Self {
            content_length: content.chars().count(),
            word_count: content.split_whitespace().count(),
            line_count: content.lines().filter(|l| !l.trim().is_empty()).count(),
            sentence_count,
            has_code_block: content.contains("```"),
            has_numbered_steps: step_marker_count > 0,
            step_marker_count,
            has_bullets: BULLET.is_match(content),
            has_numbers: content.chars().any(|c| c.is_ascii_digit()),
            has_headings: HEADING.is_match(content),
            has_example: keywords::any_present(&lowered, keywords::EXAMPLE_MARKERS),
            has_caution: keywords::any_present(&lowered, keywords::CAUTION_MARKERS),
            prompt_keywords: keywords::count_present(&lowered, keywords::PROMPT_KEYWORDS),
            workflow_keywords: keywords::count_present(&lowered, keywords::WORKFLOW_KEYWORDS),
            industry_keywords: keywords::count_present(&lowered, keywords::INDUSTRY_KEYWORDS),
            guide_keywords: keywords::count_present(&lowered, keywords::GUIDE_KEYWORDS),
        }
    }

    /// Keyword count for a content type.
    pub fn keyword_count(&self, content_type: crate::item::ContentType) -> u32 {
        use crate::item::ContentType;
        match content_type {
            ContentType::Prompt => self.prompt_keywords,
            ContentType::Workflow => self.workflow_keywords,
            ContentType::IndustryKnowledge => self.industry_keywords,
            ContentType::Guide => self.guide_keywords,
        }
    }

    /// Bullets or numbered steps.
    pub fn has_list(&self) -> bool {
        self.has_bullets || self.has_numbered_steps
    }

    /// Mean words per sentence, 0 for empty content.
    pub fn avg_sentence_words(&self) -> f64 {
        if self.sentence_count == 0 {
            return 0.0;
        }
        self.word_count as f64 / self.sentence_count as f64
    }
}
