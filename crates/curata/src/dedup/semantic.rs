use crate::embedding::{EmbeddingProvider, similarity_matrix};
use crate::error::{CurataError, Result};
use crate::item::CandidateItem;
use crate::retry::{RetryPolicy, with_retry};

use super::{DuplicateKind, DuplicateRecord};

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Drop every item whose similarity to an earlier kept item exceeds
/// `threshold`. Input order is the tie-break.
///
/// Any embedding failure fails the whole pass; the caller keeps its input.
pub(super) fn semantic_pass(
    items: &[CandidateItem],
    provider: &dyn EmbeddingProvider,
    threshold: f64,
    max_chars: usize,
    retry: &RetryPolicy,
) -> Result<(Vec<usize>, Vec<DuplicateRecord>)> {
    if items.len() < 2 {
        return Ok(((0..items.len()).collect(), Vec::new()));
    }

    let texts: Vec<String> = items
        .iter()
        .map(|i| truncate_chars(&i.content, max_chars))
        .collect();
    let vectors = with_retry(retry, "embed_batch", || provider.embed_batch(&texts))?;
    if vectors.len() != items.len() {
        return Err(CurataError::provider(
            provider.name(),
            format!("returned {} vectors for {} texts", vectors.len(), items.len()),
        ));
    }

    let matrix = similarity_matrix(&vectors);
    let mut kept: Vec<usize> = Vec::with_capacity(items.len());
    let mut removed = Vec::new();

    for i in 0..items.len() {
        let earlier = kept.iter().copied().find(|&j| matrix[i][j] > threshold);
        match earlier {
            Some(j) => removed.push(DuplicateRecord {
                item: items[i].clone(),
                kind: DuplicateKind::Semantic,
                duplicate_of: items[j].id.clone(),
                similarity: Some(matrix[i][j]),
            }),
            None => kept.push(i),
        }
    }

    Ok((kept, removed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate_chars("提示词工程", 2), "提示");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }
}
