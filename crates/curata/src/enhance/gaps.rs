//! Gap analysis for approved items.

use serde::{Deserialize, Serialize};

use crate::item::{ContentType, Features};

/// Missing elements of one item. `true` means the element is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapReport {
    pub examples: bool,
    pub headings: bool,
    /// Workflow only.
    pub steps: bool,
    pub details: bool,
    /// Guide only.
    pub cautions: bool,
}

impl GapReport {
    pub fn analyze(content_type: ContentType, features: &Features, min_content_chars: usize) -> Self {
        Self {
            examples: !features.has_example,
            headings: !features.has_headings,
            steps: content_type == ContentType::Workflow && !features.has_numbered_steps,
            details: features.content_length < min_content_chars,
            cautions: content_type == ContentType::Guide && !features.has_caution,
        }
    }

    /// Examples, details, cautions.
    pub fn supporting(&self) -> Vec<&'static str> {
        let mut gaps = Vec::new();
        if self.examples {
            gaps.push("examples");
        }
        if self.details {
            gaps.push("details");
        }
        if self.cautions {
            gaps.push("cautions");
        }
        gaps
    }

    /// Headings, steps.
    pub fn structural(&self) -> Vec<&'static str> {
        let mut gaps = Vec::new();
        if self.headings {
            gaps.push("headings");
        }
        if self.steps {
            gaps.push("steps");
        }
        gaps
    }

    pub fn missing(&self) -> Vec<&'static str> {
        let mut all = self.supporting();
        all.extend(self.structural());
        all
    }

    pub fn has_supporting(&self) -> bool {
        self.examples || self.details || self.cautions
    }

    pub fn has_structural(&self) -> bool {
        self.headings || self.steps
    }

    pub fn is_empty(&self) -> bool {
        !self.has_supporting() && !self.has_structural()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_prompt_gaps() {
        let content = "You are a senior copywriter. Write 3 taglines for a coffee brand.";
        let gaps = GapReport::analyze(ContentType::Prompt, &Features::extract(content), 300);
        assert!(gaps.examples);
        assert!(gaps.headings);
        assert!(gaps.details);
        assert!(!gaps.steps);
        assert!(!gaps.cautions);
        assert_eq!(gaps.supporting(), vec!["examples", "details"]);
        assert_eq!(gaps.structural(), vec!["headings"]);
    }

    #[test]
    fn test_workflow_without_steps() {
        let content = "Automate the report and send it every morning.";
        let gaps = GapReport::analyze(ContentType::Workflow, &Features::extract(content), 300);
        assert!(gaps.steps);
        assert!(gaps.has_structural());
    }

    #[test]
    fn test_complete_guide_has_no_gaps() {
        let content = format!(
            "## Setup\n\nFor example, install the tool.\n\nNote: back up first.\n\n{}",
            "More detail. ".repeat(30)
        );
        let gaps = GapReport::analyze(ContentType::Guide, &Features::extract(&content), 300);
        assert!(gaps.is_empty(), "{:?}", gaps);
        assert!(gaps.missing().is_empty());
    }
}
