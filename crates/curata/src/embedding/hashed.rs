//! Deterministic hashed term-frequency embeddings.
//!
//! Latin-script words and CJK character bigrams are hashed into a fixed number
//! of buckets with FNV-1a, weighted by term frequency, and L2-normalized. Much
//! weaker than a neural model, but it catches reposts with light edits and
//! needs nothing external.

use std::collections::HashMap;

use crate::error::Result;

use super::provider::EmbeddingProvider;

/// Default vector length.
pub const DEFAULT_DIMENSIONS: usize = 384;

pub struct HashedEmbedder {
    dimensions: usize,
}

impl HashedEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn bucket(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= u64::from(*b);
            h = h.wrapping_mul(0x100000001b3);
        }
        (h % dims as u64) as usize
    }

    fn is_cjk(c: char) -> bool {
        matches!(c as u32, 0x4E00..=0x9FFF | 0x3400..=0x4DBF | 0x3040..=0x30FF | 0xAC00..=0xD7AF)
    }

    fn tokenize(text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut word = String::new();
        let mut cjk_run: Vec<char> = Vec::new();

        let flush_word = |word: &mut String, tokens: &mut Vec<String>| {
            if word.chars().count() >= 2 {
                tokens.push(word.to_lowercase());
            }
            word.clear();
        };
        let flush_cjk = |run: &mut Vec<char>, tokens: &mut Vec<String>| {
            match run.len() {
                0 => {}
                1 => tokens.push(run[0].to_string()),
                _ => tokens.extend(run.windows(2).map(|w| w.iter().collect::<String>())),
            }
            run.clear();
        };

        for c in text.chars() {
            if Self::is_cjk(c) {
                flush_word(&mut word, &mut tokens);
                cjk_run.push(c);
            } else if c.is_alphanumeric() || c == '_' {
                flush_cjk(&mut cjk_run, &mut tokens);
                word.push(c);
            } else {
                flush_word(&mut word, &mut tokens);
                flush_cjk(&mut cjk_run, &mut tokens);
            }
        }
        flush_word(&mut word, &mut tokens);
        flush_cjk(&mut cjk_run, &mut tokens);
        tokens
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let tokens = Self::tokenize(text);
        let mut vec = vec![0.0f32; self.dimensions];
        if tokens.is_empty() {
            return vec;
        }

        let mut tf: HashMap<&str, f32> = HashMap::new();
        for tok in &tokens {
            *tf.entry(tok.as_str()).or_default() += 1.0;
        }

        let total = tokens.len() as f32;
        for (term, count) in tf {
            // Longer terms carry more signal than short function words.
            let weight = 1.0 + (term.chars().count() as f32).ln();
            vec[Self::bucket(term, self.dimensions)] += (count / total) * weight;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

impl Default for HashedEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSIONS)
    }
}

impl EmbeddingProvider for HashedEmbedder {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashed-tf"
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::cosine_similarity;

    #[test]
    fn test_dimensions_and_empty_text() {
        let e = HashedEmbedder::new(64);
        let v = e.embed("").unwrap();
        assert_eq!(v.len(), 64);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_deterministic() {
        let e = HashedEmbedder::default();
        assert_eq!(
            e.embed("rust borrow checker").unwrap(),
            e.embed("rust borrow checker").unwrap()
        );
    }

    #[test]
    fn test_word_order_does_not_matter() {
        let e = HashedEmbedder::default();
        let a = e.embed("write three taglines for a coffee brand").unwrap();
        let b = e.embed("for a coffee brand write three taglines").unwrap();
        assert!(cosine_similarity(&a, &b) > 0.999);
    }

    #[test]
    fn test_unrelated_texts_are_dissimilar() {
        let e = HashedEmbedder::default();
        let a = e.embed("kubernetes deployment rollout strategy").unwrap();
        let b = e.embed("sourdough bread hydration levels").unwrap();
        assert!(cosine_similarity(&a, &b) < 0.5);
    }

    #[test]
    fn test_cjk_bigrams() {
        let tokens = HashedEmbedder::tokenize("提示词工程 guide");
        assert_eq!(tokens, vec!["提示", "示词", "词工", "工程", "guide"]);
    }
}
