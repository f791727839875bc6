use super::types::PipelineConfig;
use crate::error::{CurataError, Result};

fn invalid(key: &str, message: impl std::fmt::Display) -> CurataError {
    CurataError::Config(format!("{key} {message}"))
}

fn check_unit(key: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid(key, format!("must be within [0, 1], got {value}")));
    }
    Ok(())
}

/// Validate configuration.
pub fn validate_config(config: &PipelineConfig) -> Result<()> {
    let threshold = config.dedup.semantic_threshold;
    if !(threshold > 0.0 && threshold <= 1.0) {
        return Err(invalid(
            "dedup.semantic_threshold",
            format!("must be within (0, 1], got {threshold}"),
        ));
    }
    if config.dedup.embedding_max_chars == 0 {
        return Err(invalid("dedup.embedding_max_chars", "cannot be 0"));
    }

    check_unit(
        "classifier.min_rule_confidence",
        config.classifier.min_rule_confidence,
    )?;
    check_unit("review.min_confidence", config.review.min_confidence)?;

    let thresholds = &config.scoring.thresholds;
    for (key, value) in [
        ("scoring.thresholds.prompt", thresholds.prompt),
        ("scoring.thresholds.workflow", thresholds.workflow),
        (
            "scoring.thresholds.industry_knowledge",
            thresholds.industry_knowledge,
        ),
        ("scoring.thresholds.guide", thresholds.guide),
    ] {
        if value > 100 {
            return Err(invalid(key, format!("must be at most 100, got {value}")));
        }
    }

    if config.review.content_min_chars >= config.review.content_max_chars {
        return Err(invalid(
            "review.content_min_chars",
            "must be less than review.content_max_chars",
        ));
    }
    if config.cleaning.min_content_chars >= config.cleaning.max_content_chars {
        return Err(invalid(
            "cleaning.min_content_chars",
            "must be less than cleaning.max_content_chars",
        ));
    }

    let boost = config.enhance.boost_per_field;
    if !boost.is_finite() || boost < 0.0 {
        return Err(invalid(
            "enhance.boost_per_field",
            format!("must be a non-negative number, got {boost}"),
        ));
    }

    if config.retry.max_attempts == 0 {
        return Err(invalid("retry.max_attempts", "must be at least 1"));
    }
    if config.retry.base_delay_ms > config.retry.max_delay_ms {
        return Err(invalid(
            "retry.base_delay_ms",
            "cannot exceed retry.max_delay_ms",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(config: &PipelineConfig, key: &str) {
        match validate_config(config) {
            Err(CurataError::Config(msg)) => assert!(msg.contains(key), "{msg}"),
            other => panic!("expected config error for {key}, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&PipelineConfig::default()).is_ok());
    }

    #[test]
    fn test_semantic_threshold_bounds() {
        let mut config = PipelineConfig::default();
        config.dedup.semantic_threshold = 0.0;
        assert_invalid(&config, "dedup.semantic_threshold");

        config.dedup.semantic_threshold = 1.0;
        assert!(validate_config(&config).is_ok());

        config.dedup.semantic_threshold = f64::NAN;
        assert_invalid(&config, "dedup.semantic_threshold");
    }

    #[test]
    fn test_threshold_above_100_fails() {
        let mut config = PipelineConfig::default();
        config.scoring.thresholds.workflow = 101;
        assert_invalid(&config, "scoring.thresholds.workflow");
    }

    #[test]
    fn test_inverted_length_bounds_fail() {
        let mut config = PipelineConfig::default();
        config.review.content_min_chars = 3000;
        assert_invalid(&config, "review.content_min_chars");
    }

    #[test]
    fn test_confidence_out_of_range_fails() {
        let mut config = PipelineConfig::default();
        config.classifier.min_rule_confidence = -0.1;
        assert_invalid(&config, "classifier.min_rule_confidence");
    }

    #[test]
    fn test_zero_attempts_fails() {
        let mut config = PipelineConfig::default();
        config.retry.max_attempts = 0;
        assert_invalid(&config, "retry.max_attempts");
    }
}
