use crate::classify::Classifier;
use crate::clean::Cleaner;
use crate::config::PipelineConfig;
use crate::dedup::Deduplicator;
use crate::enhance::Enhancer;
use crate::error::Result;
use crate::filter::QualityFilter;
use crate::retry::RetryPolicy;
use crate::score::Scorer;

/// Every stage with its compiled rule tables, built once per run
/// configuration and shared by all items.
pub struct PipelineContext {
    pub config: PipelineConfig,
    pub dedup: Deduplicator,
    pub cleaner: Cleaner,
    pub classifier: Classifier,
    pub scorer: Scorer,
    pub filter: QualityFilter,
    pub enhancer: Enhancer,
}

impl PipelineContext {
    /// Validate `config` and compile every stage. Fails before any item is
    /// seen.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let retry = RetryPolicy::from(&config.retry);

        Ok(Self {
            dedup: Deduplicator::new(&config.dedup).with_retry(retry),
            cleaner: Cleaner::new(&config.cleaning)?,
            classifier: Classifier::new(&config.classifier)?,
            scorer: Scorer::new(&config.scoring)?,
            filter: QualityFilter::new(&config)?,
            enhancer: Enhancer::new(&config.enhance).with_retry(retry),
            config,
        })
    }
}
