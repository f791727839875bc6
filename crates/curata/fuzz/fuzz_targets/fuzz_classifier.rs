//! Fuzz target for the classifier.
//!
//! Classification must never panic, must always pick a type, and must keep
//! both confidences within [0, 1].

#![no_main]

use curata::classify::Classifier;
use curata::config::ClassifierConfig;
use curata::CandidateItem;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(classifier) = Classifier::new(&ClassifierConfig::default()) else {
        return;
    };

    let content = String::from_utf8_lossy(data);
    let item = classifier.classify(CandidateItem::new("fuzz", content.as_ref()));

    assert!((0.0..=1.0).contains(&item.classification_confidence));
    assert!(item.validated_confidence <= item.classification_confidence);
    assert!(!item.classification_reason.is_empty());
});
