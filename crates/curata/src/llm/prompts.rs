//! Prompt templates for LLM interactions.

use crate::item::ContentType;

use super::provider::GenerationRequest;

/// Longest content excerpt sent to a model.
const MAX_PROMPT_CONTENT_CHARS: usize = 4000;

fn gap_instruction(gap: &str) -> &'static str {
    match gap {
        "examples" => "- examples: add one short, concrete worked example under a `## Example` heading",
        "details" => "- details: add the supporting detail a practitioner would need under a `## Details` heading",
        "cautions" => "- cautions: add common pitfalls or warnings under a `## Notes` heading",
        "headings" => "- headings: add section headings where the text changes topic",
        "steps" => "- steps: express the procedure as numbered steps",
        _ => "- other: fill the gap if it applies",
    }
}

fn type_description(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Prompt => "a reusable prompt for an AI assistant",
        ContentType::Workflow => "a step-by-step workflow",
        ContentType::IndustryKnowledge => "a piece of practitioner knowledge from an industry",
        ContentType::Guide => "a how-to guide or tutorial",
    }
}

/// Build a prompt asking for the sections an item is missing.
pub fn enhancement_prompt(request: &GenerationRequest) -> String {
    let content: String = request.content.chars().take(MAX_PROMPT_CONTENT_CHARS).collect();
    let title = if request.title.is_empty() {
        "(untitled)"
    } else {
        request.title.as_str()
    };
    let gaps = request
        .gaps
        .iter()
        .map(|g| gap_instruction(g))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Improve this curated snippet by adding only what is missing.

## Snippet
- Type: {} ({})
- Title: {}

{}

## Missing
{}

## Task
Write ONLY the new sections, in the snippet's language, as markdown. Do not
repeat or rewrite the original text. Keep each section short and specific to
the snippet.

Respond with JSON in this exact format:
{{
  "additions": "the new markdown sections",
  "fields_added": ["examples"]
}}

`fields_added` lists the gap keys you actually filled."#,
        request.content_type,
        type_description(request.content_type),
        title,
        content,
        gaps,
    )
}

/// System prompt for all enhancement requests.
pub fn system_prompt() -> &'static str {
    r#"You are an editor for Curata, a pipeline that curates reusable snippets: prompts, workflows, industry knowledge, and guides.

Your role is to fill specific gaps in a snippet that has already been approved.

Guidelines:
- Be concise and specific
- Add, never remove or contradict, the original content
- Match the language of the snippet (English or Chinese)
- Do not invent statistics, quotes, or links
- Always respond with valid JSON when requested"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_each_gap() {
        let request = GenerationRequest {
            content_type: ContentType::Guide,
            title: "Brewing tea".to_string(),
            content: "Boil water and steep.".to_string(),
            gaps: vec!["examples".to_string(), "cautions".to_string()],
        };
        let prompt = enhancement_prompt(&request);
        assert!(prompt.contains("Brewing tea"));
        assert!(prompt.contains("## Example"));
        assert!(prompt.contains("## Notes"));
        assert!(!prompt.contains("## Details"));
    }

    #[test]
    fn test_long_content_is_truncated() {
        let request = GenerationRequest {
            content_type: ContentType::Prompt,
            title: String::new(),
            content: "a".repeat(10_000),
            gaps: vec!["details".to_string()],
        };
        let prompt = enhancement_prompt(&request);
        assert!(prompt.contains("(untitled)"));
        assert!(prompt.len() < 6000);
    }
}
