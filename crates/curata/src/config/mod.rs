//! Pipeline configuration: types, loading, validation.
//!
//! Configuration is read from a TOML file with `CURATA_`-prefixed environment
//! overrides, using `__` to separate nested keys
//! (e.g. `CURATA_DEDUP__SEMANTIC_THRESHOLD=0.9`). Invalid values are rejected
//! by [`validate_config`] before any item is processed.

mod loader;
mod types;
mod validate;

pub use loader::{load_config, load_config_from_str};
pub use types::*;
pub use validate::validate_config;
