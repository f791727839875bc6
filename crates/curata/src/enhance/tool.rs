//! Local structuring tools for heading and step gaps.

use std::collections::BTreeSet;

use crate::error::{CurataError, Result};
use crate::item::ContentType;

use super::gaps::GapReport;
use super::strategy::StrategyOutput;

/// A tool that restructures content without adding new information.
pub trait StructureTool: Send + Sync {
    fn restructure(
        &self,
        content_type: ContentType,
        title: &str,
        content: &str,
        gaps: &GapReport,
    ) -> Result<StrategyOutput>;

    fn name(&self) -> &str;
}

/// Derives section headings from paragraphs, and numbered steps from
/// sentences for workflows.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionOutliner;

const HEADING_WORDS: usize = 6;

/// A run of prose or a fenced code block, in document order.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Block<'a> {
    Prose(&'a str),
    Fence(&'a str),
}

/// Split content into prose and fenced blocks. An unclosed fence runs to the end.
fn blocks(content: &str) -> Vec<Block<'_>> {
    let mut out = Vec::new();
    let mut rest = content;
    while let Some(open) = rest.find("```") {
        if open > 0 {
            out.push(Block::Prose(&rest[..open]));
        }
        let after = &rest[open + 3..];
        let close = after.find("```").map_or(rest.len(), |c| open + 3 + c + 3);
        out.push(Block::Fence(&rest[open..close]));
        rest = &rest[close..];
    }
    if !rest.is_empty() {
        out.push(Block::Prose(rest));
    }
    out
}

fn paragraphs(content: &str) -> Vec<Block<'_>> {
    blocks(content)
        .into_iter()
        .flat_map(|block| match block {
            Block::Fence(f) => vec![Block::Fence(f.trim())],
            Block::Prose(p) => p
                .split("\n\n")
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(Block::Prose)
                .collect(),
        })
        .collect()
}

fn push_trimmed<'a>(out: &mut Vec<&'a str>, s: &'a str) {
    let s = s.trim();
    if !s.is_empty() {
        out.push(s);
    }
}

/// Sentences of a prose block, terminators kept. `.`, `!` and `?` end a
/// sentence only before whitespace or the end of a line, so decimals and
/// URLs stay whole.
fn sentences(prose: &str) -> Vec<&str> {
    let mut out = Vec::new();
    for line in prose.lines() {
        let mut start = 0;
        let mut chars = line.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            let end = i + c.len_utf8();
            let boundary = match c {
                '。' | '！' | '？' => true,
                '.' | '!' | '?' => chars.peek().is_none_or(|(_, next)| next.is_whitespace()),
                _ => false,
            };
            if boundary {
                push_trimmed(&mut out, &line[start..end]);
                start = end;
            }
        }
        push_trimmed(&mut out, &line[start..]);
    }
    out
}

/// Drop a leading `N. ` step marker.
fn strip_step_marker(s: &str) -> &str {
    let digits = s.len() - s.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    match s[digits..].strip_prefix(". ") {
        Some(rest) if digits > 0 => rest,
        _ => s,
    }
}

/// First few words of a paragraph, as a heading.
fn heading_from(paragraph: &str) -> String {
    let first = sentences(paragraph).into_iter().next().unwrap_or(paragraph);
    let words: Vec<&str> = strip_step_marker(first)
        .split_whitespace()
        .take(HEADING_WORDS)
        .collect();
    let text = words
        .join(" ")
        .trim_end_matches([',', ':', ';', '.', '!', '?', '，', '：', '。', '！', '？'])
        .to_string();
    if text.is_empty() { "Details".to_string() } else { text }
}

impl SectionOutliner {
    fn outline(&self, content_type: ContentType, title: &str, content: &str) -> String {
        let top = if title.trim().is_empty() {
            content_type.to_string()
        } else {
            title.trim().to_string()
        };
        let mut out = format!("## {}\n\n", top);
        for (i, block) in paragraphs(content).into_iter().enumerate() {
            if i > 0 {
                out.push_str("\n\n");
            }
            match block {
                Block::Prose(p) => {
                    if i > 0 {
                        out.push_str(&format!("### {}\n\n", heading_from(p)));
                    }
                    out.push_str(p);
                }
                Block::Fence(f) => out.push_str(f),
            }
        }
        out
    }

    /// Number prose sentences; fenced blocks stay in place unnumbered.
    fn number_steps(&self, content: &str) -> Option<String> {
        let mut lines = Vec::new();
        let mut steps = 0;
        for block in blocks(content) {
            match block {
                Block::Prose(p) => {
                    for sentence in sentences(p) {
                        steps += 1;
                        lines.push(format!("{}. {}", steps, sentence));
                    }
                }
                Block::Fence(f) => lines.push(f.trim().to_string()),
            }
        }
        if steps < 2 {
            return None;
        }
        Some(lines.join("\n"))
    }
}

impl StructureTool for SectionOutliner {
    fn restructure(
        &self,
        content_type: ContentType,
        title: &str,
        content: &str,
        gaps: &GapReport,
    ) -> Result<StrategyOutput> {
        let mut body = content.trim().to_string();
        let mut fields_added = BTreeSet::new();

        if gaps.steps {
            if let Some(steps) = self.number_steps(&body) {
                body = steps;
                fields_added.insert("steps".to_string());
            }
        }
        if gaps.headings {
            body = self.outline(content_type, title, &body);
            fields_added.insert("headings".to_string());
        }

        if fields_added.is_empty() {
            return Err(CurataError::provider(self.name(), "no structural gap to fill"));
        }
        let reason = format!(
            "outlined {}",
            fields_added.iter().cloned().collect::<Vec<_>>().join(" and ")
        );
        Ok(StrategyOutput {
            content: body,
            fields_added,
            reason,
        })
    }

    fn name(&self) -> &str {
        "section-outliner"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Features;

    fn gaps(headings: bool, steps: bool) -> GapReport {
        GapReport {
            headings,
            steps,
            ..Default::default()
        }
    }

    #[test]
    fn test_outline_adds_headings_per_paragraph() {
        let content = "Start with the data.\n\nThen clean it, carefully and slowly.";
        let out = SectionOutliner
            .restructure(ContentType::Guide, "Data prep", content, &gaps(true, false))
            .unwrap();
        assert!(out.content.starts_with("## Data prep\n\nStart with the data."));
        assert!(out.content.contains("### Then clean it"));
        assert!(Features::extract(&out.content).has_headings);
        assert_eq!(out.fields_added.len(), 1);
    }

    #[test]
    fn test_workflow_sentences_become_steps() {
        let content = "Export the sheet. Upload it to the bucket. Trigger the import job.";
        let out = SectionOutliner
            .restructure(ContentType::Workflow, "", content, &gaps(true, true))
            .unwrap();
        let f = Features::extract(&out.content);
        assert!(f.has_numbered_steps);
        assert_eq!(f.step_marker_count, 3);
        assert!(out.content.starts_with("## Workflow"));
        assert!(out.fields_added.contains("steps"));
    }

    #[test]
    fn test_nothing_to_do_is_error() {
        let result =
            SectionOutliner.restructure(ContentType::Workflow, "", "One step only", &gaps(false, true));
        assert!(result.is_err());
    }

    #[test]
    fn test_sentences_keep_decimals_and_urls() {
        assert_eq!(
            sentences("Use v1.2 now. See example.com/a.b for more! 好的。Done"),
            vec!["Use v1.2 now.", "See example.com/a.b for more!", "好的。", "Done"]
        );
    }

    #[test]
    fn test_fenced_code_passes_through() {
        let fence = "```sh\nsh get.sh\n\necho done. ok\n```";
        let content = format!(
            "Install v1.2 from https://example.com/get.sh first. Run the installer.\n\n{}\n\nVerify the version.",
            fence
        );
        let out = SectionOutliner
            .restructure(ContentType::Workflow, "", &content, &gaps(true, true))
            .unwrap();

        assert!(out.content.contains(fence));
        assert!(out.content.contains("1. Install v1.2 from https://example.com/get.sh first."));
        assert!(out.content.contains("2. Run the installer."));
        assert!(out.content.contains("### Verify the version\n\n3. Verify the version."));
        assert!(!out.content.contains("### echo"));
        assert_eq!(Features::extract(&out.content).step_marker_count, 3);
    }
}
