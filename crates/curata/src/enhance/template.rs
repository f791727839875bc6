//! Deterministic per-type rewrite. Always succeeds.

use std::collections::BTreeSet;

use crate::item::{ContentType, Features};

use super::gaps::GapReport;
use super::strategy::StrategyOutput;

struct Template {
    heading: &'static str,
    suffix_heading: &'static str,
    suffix: &'static [&'static str],
}

fn template_for(content_type: ContentType) -> Template {
    match content_type {
        ContentType::Prompt => Template {
            heading: "## Prompt",
            suffix_heading: "## Output Requirements",
            suffix: &[
                "Follow the role and task described above",
                "State any assumptions before answering",
                "Keep the response focused on the request",
            ],
        },
        ContentType::Workflow => Template {
            heading: "## Workflow",
            suffix_heading: "## Checklist",
            suffix: &[
                "Inputs are prepared before the first step",
                "Each step is verified before moving on",
                "The final output is reviewed",
            ],
        },
        ContentType::IndustryKnowledge => Template {
            heading: "## Key Insight",
            suffix_heading: "## Takeaways",
            suffix: &[
                "Apply the practice to your own context",
                "Measure the result before and after",
            ],
        },
        ContentType::Guide => Template {
            heading: "## Overview",
            suffix_heading: "## Notes",
            suffix: &[
                "Check the prerequisites before starting",
                "Verify each step before moving on",
            ],
        },
    }
}

/// Wrap `content` in the type's heading and closing section.
pub fn apply_template(
    content_type: ContentType,
    content: &str,
    features: &Features,
    gaps: &GapReport,
) -> StrategyOutput {
    let template = template_for(content_type);
    let mut out = String::with_capacity(content.len() + 256);
    let mut fields_added = BTreeSet::new();

    if !features.has_headings {
        out.push_str(template.heading);
        out.push_str("\n\n");
        fields_added.insert("headings".to_string());
    }
    out.push_str(content.trim_end());
    out.push_str("\n\n");
    out.push_str(template.suffix_heading);
    out.push('\n');
    for line in template.suffix {
        out.push_str("\n- ");
        out.push_str(line);
    }
    fields_added.insert("template_sections".to_string());
    if gaps.cautions {
        fields_added.insert("cautions".to_string());
    }

    StrategyOutput {
        content: out,
        fields_added,
        reason: format!("applied {} template", content_type.key()),
    }
}
