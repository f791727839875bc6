//! Per-type rubric tables.
//!
//! Patterns match raw content and carry their own `(?i)` flag. Chinese
//! alternatives sit beside the English ones since collectors harvest both.

use regex::Regex;

use crate::error::Result;
use crate::item::ContentType;

use super::rubric::{Dimension, Rubric, Signal, SignalTest};

fn pattern(name: &'static str, points: f64, re: &str) -> Result<Signal> {
    Ok(Signal {
        name,
        points,
        test: SignalTest::Pattern(Regex::new(re)?),
    })
}

fn not_pattern(name: &'static str, points: f64, re: &str) -> Result<Signal> {
    Ok(Signal {
        name,
        points,
        test: SignalTest::NotPattern(Regex::new(re)?),
    })
}

fn feature(name: &'static str, points: f64, test: fn(&crate::item::Features) -> bool) -> Signal {
    Signal {
        name,
        points,
        test: SignalTest::Feature(test),
    }
}

fn length(name: &'static str, points: f64, min: usize, max: usize) -> Signal {
    Signal {
        name,
        points,
        test: SignalTest::Length { min, max },
    }
}

fn dimension(name: &'static str, max: f64, signals: Vec<Signal>) -> Dimension {
    Dimension { name, max, signals }
}

// =============================================================================
// PROMPT: practicality 50, clarity 30, uniqueness 20
// =============================================================================

fn prompt_rubric() -> Result<Rubric> {
    Ok(Rubric {
        content_type: ContentType::Prompt,
        dimensions: vec![
            dimension(
                "practicality",
                50.0,
                vec![
                    pattern(
                        "task_request",
                        15.0,
                        r"(?i)\b(write|create|generate|draft|list|summari[sz]e|explain|produce|design|translate|rewrite|provide|compose|analy[sz]e)\b|请|生成|创建|写",
                    )?,
                    pattern(
                        "role_assignment",
                        10.0,
                        r"(?i)\b(you are|act as|pretend to be)\b|你是|扮演",
                    )?,
                    pattern(
                        "output_constraint",
                        10.0,
                        r"(?i)\d|\b(format|output|words|bullets?|table|json|markdown|characters|sentences)\b|格式|输出|字数",
                    )?,
                    length("length_fit", 10.0, 50, 500),
                    length("length_long", 5.0, 501, usize::MAX),
                    pattern(
                        "context_given",
                        5.0,
                        r"(?i)\b(for (a|an|the|my|our)|audience|scenario|context|background)\b|场景|背景|面向",
                    )?,
                ],
            ),
            dimension(
                "clarity",
                30.0,
                vec![
                    not_pattern(
                        "unambiguous",
                        10.0,
                        r"(?i)\b(maybe|something|whatever|stuff|etc)\b|随便|大概|之类",
                    )?,
                    feature("structured", 10.0, |f| f.has_list()),
                    pattern(
                        "sequenced",
                        5.0,
                        r"(?i)\b(first|then|next|finally)\b|首先|然后|最后",
                    )?,
                    feature("concise_sentences", 5.0, |f| {
                        f.sentence_count > 0 && f.avg_sentence_words() <= 25.0
                    }),
                ],
            ),
            dimension(
                "uniqueness",
                20.0,
                vec![
                    pattern(
                        "specific_constraints",
                        10.0,
                        r"(?i)\b(tone|style|voice|avoid|must|don't|never|exactly|audience)\b|风格|语气|不要|必须",
                    )?,
                    not_pattern(
                        "not_generic",
                        5.0,
                        r"(?i)\b(help me|any ideas|anything|some ideas|tell me about)\b|帮我|随便",
                    )?,
                    pattern(
                        "domain_specific",
                        5.0,
                        r"(?i)\b(brand|marketing|copy\w*|seo|sql|python|rust|javascript|legal|medical|finance|startup|product|ux)\b|营销|品牌|编程|文案|法律|医疗|金融",
                    )?,
                ],
            ),
        ],
    })
}

// =============================================================================
// WORKFLOW: completeness 30, extensibility 20, practicality 30, reusability 20
// =============================================================================

fn workflow_rubric() -> Result<Rubric> {
    Ok(Rubric {
        content_type: ContentType::Workflow,
        dimensions: vec![
            dimension(
                "completeness",
                30.0,
                vec![
                    feature("numbered_steps", 10.0, |f| f.has_numbered_steps),
                    feature("multi_step", 10.0, |f| f.step_marker_count >= 3),
                    pattern(
                        "io_described",
                        5.0,
                        r"(?i)\b(inputs?|outputs?|results?|deliverables?)\b|输入|输出|结果",
                    )?,
                    pattern(
                        "tools_named",
                        5.0,
                        r"(?i)\b(tools?|apis?|scripts?|cli|commands?|zapier|n8n|github actions|cron)\b|工具|脚本|命令",
                    )?,
                ],
            ),
            dimension(
                "extensibility",
                20.0,
                vec![
                    pattern(
                        "configurable",
                        10.0,
                        r"(?i)\b(config\w*|parameters?|options?|variables?|customi[sz]e|settings?)\b|参数|配置|变量|自定义",
                    )?,
                    pattern(
                        "branching",
                        5.0,
                        r"(?i)\b(if|otherwise|else|when|conditions?)\b|如果|否则|条件|分支",
                    )?,
                    pattern(
                        "integrations",
                        5.0,
                        r"(?i)\b(integrat\w*|plugins?|webhooks?|extend\w*|hooks?)\b|集成|插件|扩展",
                    )?,
                ],
            ),
            dimension(
                "practicality",
                30.0,
                vec![
                    feature("code_block", 10.0, |f| f.has_code_block),
                    pattern(
                        "shell_commands",
                        5.0,
                        r"(?m)^[ \t]*(\$|>|npm|pip|cargo|git|docker|curl|python|make)\s",
                    )?,
                    pattern(
                        "automation",
                        10.0,
                        r"(?i)\b(automat\w*|schedul\w*|trigger\w*|cron)\b|自动化|定时|触发",
                    )?,
                    length("length_fit", 5.0, 200, 3000),
                ],
            ),
            dimension(
                "reusability",
                20.0,
                vec![
                    pattern(
                        "template",
                        10.0,
                        r"(?i)\b(template|reusable|reuse|generic|boilerplate)\b|模板|复用|通用",
                    )?,
                    pattern(
                        "general_applicability",
                        5.0,
                        r"(?i)\b(any|general|works for|adapt\w*)\b|任何|适用",
                    )?,
                    feature("headings", 5.0, |f| f.has_headings),
                ],
            ),
        ],
    })
}

// =============================================================================
// INDUSTRY KNOWLEDGE: depth 40, practicality 40, systematic 20
// =============================================================================

fn industry_rubric() -> Result<Rubric> {
    Ok(Rubric {
        content_type: ContentType::IndustryKnowledge,
        dimensions: vec![
            dimension(
                "depth",
                40.0,
                vec![
                    length("long_form", 10.0, 500, usize::MAX),
                    pattern(
                        "quantified",
                        10.0,
                        r"(?i)\d+(\.\d+)?\s*(%|percent\b|x\b|ms\b|倍|秒)",
                    )?,
                    pattern(
                        "causal_reasoning",
                        10.0,
                        r"(?i)\b(because|why|therefore|root cause|as a result|due to)\b|原因|因为|所以|导致",
                    )?,
                    pattern(
                        "firsthand_experience",
                        10.0,
                        r"(?i)\b(case study|we found|in production|in practice|experience|years)\b|案例|实战|经验",
                    )?,
                ],
            ),
            dimension(
                "practicality",
                40.0,
                vec![
                    pattern(
                        "actionable",
                        15.0,
                        r"(?i)\b(should|avoid|always|never|must|recommend\w*|prefer)\b|建议|应该|避免|务必",
                    )?,
                    feature("code_block", 10.0, |f| f.has_code_block),
                    feature("example", 10.0, |f| f.has_example),
                    pattern(
                        "pitfalls",
                        5.0,
                        r"(?i)\b(pitfalls?|mistakes?|gotchas?|anti-patterns?|bugs?)\b|踩坑|坑|错误",
                    )?,
                ],
            ),
            dimension(
                "systematic",
                20.0,
                vec![
                    feature("listed", 10.0, |f| f.has_list()),
                    feature("headings", 5.0, |f| f.has_headings),
                    pattern(
                        "summary",
                        5.0,
                        r"(?i)\b(summary|in short|takeaways?|key points|tl;dr|conclusion)\b|总结|要点",
                    )?,
                ],
            ),
        ],
    })
}

// =============================================================================
// GUIDE: directiveness 40, structure 30, practicality 30
// =============================================================================

fn guide_rubric() -> Result<Rubric> {
    Ok(Rubric {
        content_type: ContentType::Guide,
        dimensions: vec![
            dimension(
                "directiveness",
                40.0,
                vec![
                    pattern(
                        "how_to",
                        15.0,
                        r"(?i)\b(how to|follow|first|then|next)\b|步骤|首先|然后|如何",
                    )?,
                    feature("numbered_steps", 10.0, |f| f.has_numbered_steps),
                    pattern(
                        "goal_stated",
                        10.0,
                        r"(?i)\b(goal|objective|you will learn|by the end|in this (guide|tutorial|post))\b|目标|目的|你将",
                    )?,
                    pattern(
                        "prerequisites",
                        5.0,
                        r"(?i)\b(prerequisites?|requirements|before you (start|begin)|install\w*)\b|准备|前提|安装",
                    )?,
                ],
            ),
            dimension(
                "structure",
                30.0,
                vec![
                    feature("headings", 15.0, |f| f.has_headings),
                    feature("bullets", 5.0, |f| f.has_bullets),
                    length("length_fit", 5.0, 300, 5000),
                    pattern(
                        "conclusion",
                        5.0,
                        r"(?i)\b(conclusion|summary|next steps|wrap(ping)? up)\b|总结|下一步",
                    )?,
                ],
            ),
            dimension(
                "practicality",
                30.0,
                vec![
                    feature("code_block", 10.0, |f| f.has_code_block),
                    feature("example", 10.0, |f| f.has_example),
                    feature("cautions", 5.0, |f| f.has_caution),
                    pattern(
                        "troubleshooting",
                        5.0,
                        r"(?i)\b(troubleshoot\w*|faq|common (issues|errors|problems)|errors?)\b|常见问题|排错|报错",
                    )?,
                ],
            ),
        ],
    })
}

/// Build the rubric for every type.
pub fn build_rubrics() -> Result<Vec<Rubric>> {
    Ok(vec![
        prompt_rubric()?,
        workflow_rubric()?,
        industry_rubric()?,
        guide_rubric()?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Features;

    #[test]
    fn test_every_rubric_sums_to_100() {
        for rubric in build_rubrics().unwrap() {
            assert_eq!(rubric.max_total(), 100.0, "{}", rubric.content_type);
        }
    }

    #[test]
    fn test_rubric_per_type_in_order() {
        let types: Vec<ContentType> = build_rubrics()
            .unwrap()
            .iter()
            .map(|r| r.content_type)
            .collect();
        assert_eq!(types, ContentType::ALL.to_vec());
    }

    #[test]
    fn test_dimension_names() {
        let rubrics = build_rubrics().unwrap();
        let names: Vec<Vec<&str>> = rubrics
            .iter()
            .map(|r| r.dimensions.iter().map(|d| d.name).collect())
            .collect();
        assert_eq!(names[0], vec!["practicality", "clarity", "uniqueness"]);
        assert_eq!(
            names[1],
            vec!["completeness", "extensibility", "practicality", "reusability"]
        );
        assert_eq!(names[2], vec!["depth", "practicality", "systematic"]);
        assert_eq!(names[3], vec!["directiveness", "structure", "practicality"]);
    }

    #[test]
    fn test_prompt_task_keyword_gives_practicality() {
        let rubric = prompt_rubric().unwrap();
        let content = "You are a senior copywriter. Write 3 taglines for a coffee brand.";
        let f = Features::extract(content);
        let practicality = rubric.dimension("practicality").unwrap();
        assert!(practicality.fired(content, &f).contains(&"task_request"));
        assert_eq!(practicality.score(content, &f), 50.0);
    }
}
