//! Mock LLM provider for testing.

use crate::error::{CurataError, Result};

use super::provider::{GeneratedSections, GenerationRequest, LlmConfig, LlmProvider};

/// Mock LLM provider that returns predictable responses for testing.
pub struct MockProvider {
    config: LlmConfig,
    fail: bool,
}

impl MockProvider {
    /// Create a new mock provider.
    pub fn new() -> Self {
        Self {
            config: LlmConfig::default(),
            fail: false,
        }
    }

    /// Create with custom configuration.
    pub fn with_config(config: LlmConfig) -> Self {
        Self {
            config,
            fail: false,
        }
    }

    /// A provider whose every call errors, for exercising fallbacks.
    pub fn failing() -> Self {
        Self {
            config: LlmConfig::default(),
            fail: true,
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn mock_section(gap: &str, subject: &str) -> Option<String> {
    let section = match gap {
        "examples" => format!(
            "## Example\n\nFor example, apply this to {} and compare the result with the original.",
            subject
        ),
        "details" => format!(
            "## Details\n\nWhen using this for {}, state the expected input, the constraints, and what a good result looks like.",
            subject
        ),
        "cautions" => "## Notes\n\nNote: check each step on a small case first, and watch for missing prerequisites."
            .to_string(),
        _ => return None,
    };
    Some(section)
}

impl LlmProvider for MockProvider {
    fn generate_enhancement(&self, request: &GenerationRequest) -> Result<GeneratedSections> {
        if self.fail {
            return Err(CurataError::provider("mock", "simulated LLM failure"));
        }

        let subject = if request.title.is_empty() {
            "your own task".to_string()
        } else {
            format!("\"{}\"", request.title)
        };

        let mut sections = Vec::new();
        let mut fields_added = Vec::new();
        for gap in &request.gaps {
            if let Some(section) = mock_section(gap, &subject) {
                sections.push(section);
                fields_added.push(gap.clone());
            }
        }

        Ok(GeneratedSections {
            additions: sections.join("\n\n"),
            fields_added,
        })
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ContentType;

    fn request(gaps: &[&str]) -> GenerationRequest {
        GenerationRequest {
            content_type: ContentType::Guide,
            title: "Tea".to_string(),
            content: "Boil water.".to_string(),
            gaps: gaps.iter().map(|g| g.to_string()).collect(),
        }
    }

    #[test]
    fn test_mock_fills_supporting_gaps() {
        let out = MockProvider::new()
            .generate_enhancement(&request(&["examples", "cautions"]))
            .unwrap();
        assert_eq!(out.fields_added, vec!["examples", "cautions"]);
        assert!(out.additions.contains("For example"));
        assert!(out.additions.contains("## Notes"));
    }

    #[test]
    fn test_mock_ignores_structural_gaps() {
        let out = MockProvider::new()
            .generate_enhancement(&request(&["headings"]))
            .unwrap();
        assert!(out.fields_added.is_empty());
        assert!(out.additions.is_empty());
    }

    #[test]
    fn test_failing_mock() {
        assert!(MockProvider::failing().generate_enhancement(&request(&["examples"])).is_err());
    }
}
