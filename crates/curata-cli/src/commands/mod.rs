//! CLI command implementations.

pub mod config;
pub mod inspect;
pub mod report;
pub mod run;

use std::path::Path;

use curata::PipelineConfig;

/// Load and validate configuration: defaults, the optional file, then
/// `CURATA_*` environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig, Box<dyn std::error::Error>> {
    Ok(curata::load_config(path)?)
}
