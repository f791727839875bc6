use std::collections::HashMap;

use crate::item::CandidateItem;

use super::{DuplicateKind, DuplicateRecord};

/// Keep the first occurrence of each raw content hash.
pub(super) fn exact_pass(items: Vec<CandidateItem>) -> (Vec<CandidateItem>, Vec<DuplicateRecord>) {
    let mut first_seen: HashMap<String, String> = HashMap::with_capacity(items.len());
    let mut kept = Vec::with_capacity(items.len());
    let mut removed = Vec::new();

    for item in items {
        let hash = item.content_hash();
        match first_seen.get(&hash) {
            Some(original) => removed.push(DuplicateRecord {
                duplicate_of: original.clone(),
                kind: DuplicateKind::Exact,
                similarity: None,
                item,
            }),
            None => {
                first_seen.insert(hash, item.id.clone());
                kept.push(item);
            }
        }
    }

    (kept, removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_occurrence_wins() {
        let items = vec![
            CandidateItem::new("a", "same"),
            CandidateItem::new("b", "other"),
            CandidateItem::new("c", "same"),
        ];
        let (kept, removed) = exact_pass(items);
        let ids: Vec<&str> = kept.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].item.id, "c");
        assert_eq!(removed[0].duplicate_of, "a");
    }

    #[test]
    fn test_whitespace_is_significant() {
        let items = vec![CandidateItem::new("a", "text"), CandidateItem::new("b", "text\n")];
        let (kept, removed) = exact_pass(items);
        assert_eq!(kept.len(), 2);
        assert!(removed.is_empty());
    }
}
