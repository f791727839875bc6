//! Fuzz target for the scorer.
//!
//! Scores must never panic, must stay within [0, 100], and the dimension
//! scores must add up to the total.

#![no_main]

use curata::classify::Classifier;
use curata::config::{ClassifierConfig, ScoringConfig};
use curata::score::Scorer;
use curata::CandidateItem;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let (Ok(classifier), Ok(scorer)) = (
        Classifier::new(&ClassifierConfig::default()),
        Scorer::new(&ScoringConfig::default()),
    ) else {
        return;
    };

    let content = String::from_utf8_lossy(data);
    let scored = scorer.score(classifier.classify(CandidateItem::new("fuzz", content.as_ref())));

    assert!((0.0..=100.0).contains(&scored.total_score));
    let sum: f64 = scored.dimension_scores.values().sum();
    assert!((sum - scored.total_score).abs() < 1e-9);
});
