//! Config command - print the effective configuration.

use std::path::PathBuf;

use colored::Colorize;

pub fn run(config: Option<PathBuf>, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let effective = super::load_config(config.as_deref())?;

    if verbose {
        let source = config
            .as_ref()
            .map(|p| format!("{} + CURATA_* environment", p.display()))
            .unwrap_or_else(|| "defaults + CURATA_* environment".to_string());
        eprintln!("{} {}", "Configuration from".cyan().bold(), source.white());
    }

    print!("{}", toml::to_string_pretty(&effective)?);
    Ok(())
}
