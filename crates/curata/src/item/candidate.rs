use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Where a candidate was harvested from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Github,
    Reddit,
    Twitter,
    Hackernews,
    Search,
    #[default]
    #[serde(other)]
    Other,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Source::Github => "github",
            Source::Reddit => "reddit",
            Source::Twitter => "twitter",
            Source::Hackernews => "hackernews",
            Source::Search => "search",
            Source::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// A raw snippet produced by a collector. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateItem {
    /// Stable identifier, collision-free per source.
    pub id: String,

    /// Raw text body.
    pub content: String,

    /// Optional short label.
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub source: Source,

    /// Provenance link, kept for audit only.
    #[serde(default)]
    pub url: String,

    #[serde(default = "Utc::now")]
    pub collected_at: DateTime<Utc>,
}

impl CandidateItem {
    /// Create a candidate with only the required fields set.
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            title: String::new(),
            source: Source::Other,
            url: String::new(),
            collected_at: Utc::now(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// SHA-256 of the raw content, hex encoded. No normalization is applied.
    pub fn content_hash(&self) -> String {
        content_hash(&self.content)
    }

    /// Content length in characters.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

pub(crate) fn content_hash(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_record_defaults() {
        let item: CandidateItem =
            serde_json::from_str(r#"{"id": "a1", "content": "hello"}"#).unwrap();
        assert_eq!(item.title, "");
        assert_eq!(item.url, "");
        assert_eq!(item.source, Source::Other);
    }

    #[test]
    fn test_unknown_source_maps_to_other() {
        let item: CandidateItem =
            serde_json::from_str(r#"{"id": "a1", "content": "x", "source": "mastodon"}"#)
                .unwrap();
        assert_eq!(item.source, Source::Other);

        let item: CandidateItem =
            serde_json::from_str(r#"{"id": "a1", "content": "x", "source": "hackernews"}"#)
                .unwrap();
        assert_eq!(item.source, Source::Hackernews);
    }

    #[test]
    fn test_missing_content_is_an_error() {
        let result: Result<CandidateItem, _> = serde_json::from_str(r#"{"id": "a1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_content_hash_is_raw() {
        let a = CandidateItem::new("1", "same text");
        let b = CandidateItem::new("2", "same text");
        let c = CandidateItem::new("3", "same text ");
        assert_eq!(a.content_hash(), b.content_hash());
        assert_ne!(a.content_hash(), c.content_hash());
        assert_eq!(a.content_hash().len(), 64);
    }
}
