use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::Path;

use super::types::PipelineConfig;
use super::validate::validate_config;
use crate::error::{CurataError, Result};

/// Load configuration: defaults, then an optional TOML file, then
/// `CURATA_` environment variables (nested keys split on `__`).
///
/// The result is validated; an invalid value is a fatal configuration error.
/// A path that is given but does not exist is an error too.
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    let mut figment = Figment::from(Serialized::defaults(PipelineConfig::default()));
    if let Some(path) = path {
        if !path.exists() {
            return Err(CurataError::Config(format!(
                "configuration file not found: {}",
                path.display()
            )));
        }
        figment = figment.merge(Toml::file(path));
    }

    let config: PipelineConfig = figment
        .merge(Env::prefixed("CURATA_").split("__"))
        .extract()
        .map_err(|e| CurataError::Config(e.to_string()))?;

    validate_config(&config)?;
    Ok(config)
}

/// Load configuration from a TOML string (useful for testing).
pub fn load_config_from_str(toml_str: &str) -> Result<PipelineConfig> {
    let config: PipelineConfig =
        toml::from_str(toml_str).map_err(|e| CurataError::Config(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}
