//! Rubric engine: dimensions are capped sums of independent signals.

use indexmap::IndexMap;
use regex::Regex;

use crate::item::{ContentType, Features};

/// How a signal decides whether it fires.
pub enum SignalTest {
    /// Fires when the pattern matches the raw content.
    Pattern(Regex),
    /// Fires when the pattern does not match.
    NotPattern(Regex),
    /// Fires on a cached structural feature.
    Feature(fn(&Features) -> bool),
    /// Fires when the character length is within `min..=max`.
    Length { min: usize, max: usize },
}

impl SignalTest {
    fn fires(&self, content: &str, features: &Features) -> bool {
        match self {
            SignalTest::Pattern(re) => re.is_match(content),
            SignalTest::NotPattern(re) => !re.is_match(content),
            SignalTest::Feature(f) => f(features),
            SignalTest::Length { min, max } => {
                (*min..=*max).contains(&features.content_length)
            }
        }
    }
}

pub struct Signal {
    pub name: &'static str,
    pub points: f64,
    pub test: SignalTest,
}

pub struct Dimension {
    pub name: &'static str,
    pub max: f64,
    pub signals: Vec<Signal>,
}

impl Dimension {
    /// Sum of fired signal points, capped at `max`.
    pub fn score(&self, content: &str, features: &Features) -> f64 {
        let raw: f64 = self
            .signals
            .iter()
            .filter(|s| s.test.fires(content, features))
            .map(|s| s.points)
            .sum();
        raw.min(self.max)
    }

    /// Names of the signals that fire.
    pub fn fired(&self, content: &str, features: &Features) -> Vec<&'static str> {
        self.signals
            .iter()
            .filter(|s| s.test.fires(content, features))
            .map(|s| s.name)
            .collect()
    }
}

/// A type's named dimensions, whose maxima sum to 100.
pub struct Rubric {
    pub content_type: ContentType,
    pub dimensions: Vec<Dimension>,
}

impl Rubric {
    pub fn max_total(&self) -> f64 {
        self.dimensions.iter().map(|d| d.max).sum()
    }

    /// Dimension scores in rubric order.
    pub fn score(&self, content: &str, features: &Features) -> IndexMap<String, f64> {
        self.dimensions
            .iter()
            .map(|d| (d.name.to_string(), d.score(content, features)))
            .collect()
    }

    pub fn dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dimension() -> Dimension {
        Dimension {
            name: "test",
            max: 10.0,
            signals: vec![
                Signal {
                    name: "has_code",
                    points: 8.0,
                    test: SignalTest::Feature(|f| f.has_code_block),
                },
                Signal {
                    name: "mentions_rust",
                    points: 8.0,
                    test: SignalTest::Pattern(Regex::new(r"(?i)\brust\b").unwrap()),
                },
                Signal {
                    name: "short",
                    points: 1.0,
                    test: SignalTest::Length { min: 0, max: 40 },
                },
            ],
        }
    }

    #[test]
    fn test_dimension_is_capped() {
        let content = "Rust:\n```rust\nfn main() {}\n```";
        let d = dimension();
        let f = Features::extract(content);
        assert_eq!(d.fired(content, &f).len(), 3);
        assert_eq!(d.score(content, &f), 10.0);
    }

    #[test]
    fn test_partial_signals() {
        let content = "I like rust";
        let d = dimension();
        assert_eq!(d.score(content, &Features::extract(content)), 9.0);
    }

    #[test]
    fn test_not_pattern() {
        let signal = SignalTest::NotPattern(Regex::new("maybe").unwrap());
        assert!(signal.fires("definitely", &Features::default()));
        assert!(!signal.fires("maybe", &Features::default()));
    }
}
