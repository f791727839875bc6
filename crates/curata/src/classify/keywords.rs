//! Bilingual keyword tables shared by feature extraction and classification.
//!
//! All entries are lowercase; callers match them against lowercased text.

use crate::item::ContentType;

pub const PROMPT_KEYWORDS: &[&str] = &[
    "you are",
    "act as",
    "prompt",
    "write",
    "generate",
    "rewrite",
    "respond",
    "output",
    "你是",
    "扮演",
    "请",
    "生成",
    "提示词",
];

pub const WORKFLOW_KEYWORDS: &[&str] = &[
    "workflow",
    "step",
    "pipeline",
    "process",
    "then",
    "finally",
    "automation",
    "流程",
    "步骤",
    "工作流",
    "自动化",
    "首先",
    "然后",
];

pub const INDUSTRY_KEYWORDS: &[&str] = &[
    "best practice",
    "lesson",
    "experience",
    "insight",
    "industry",
    "case study",
    "in production",
    "经验",
    "最佳实践",
    "优化",
    "行业",
    "案例",
    "踩坑",
];

pub const GUIDE_KEYWORDS: &[&str] = &[
    "guide",
    "tutorial",
    "how to",
    "getting started",
    "introduction",
    "learn",
    "overview",
    "指南",
    "教程",
    "方法",
    "入门",
    "如何",
];

pub const EXAMPLE_MARKERS: &[&str] = &[
    "example",
    "e.g.",
    "for instance",
    "sample",
    "示例",
    "例子",
    "例如",
    "比如",
];

pub const CAUTION_MARKERS: &[&str] = &[
    "caution",
    "warning",
    "note:",
    "notes",
    "pitfall",
    "gotcha",
    "be careful",
    "注意",
    "警告",
];

/// Keyword table for a content type.
pub fn keywords_for(content_type: ContentType) -> &'static [&'static str] {
    match content_type {
        ContentType::Prompt => PROMPT_KEYWORDS,
        ContentType::Workflow => WORKFLOW_KEYWORDS,
        ContentType::IndustryKnowledge => INDUSTRY_KEYWORDS,
        ContentType::Guide => GUIDE_KEYWORDS,
    }
}

/// Number of distinct keywords from `keywords` present in `lowered`.
pub fn count_present(lowered: &str, keywords: &[&str]) -> u32 {
    keywords.iter().filter(|kw| lowered.contains(*kw)).count() as u32
}

/// Whether any keyword from `keywords` is present in `lowered`.
pub fn any_present(lowered: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| lowered.contains(kw))
}
