//! Init and Config commands.

use anyhow::{Context, Result, anyhow};
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::GraphError;

/// Create `.pygrapher/settings.toml` under `dir`.
pub fn run_init(dir: &Path, force: bool) -> Result<PathBuf> {
    let path = Settings::init_config_file(dir, force).map_err(|e| anyhow!("{e}"))?;

    println!("Created configuration file at: {}", path.display());
    println!("Edit this file to customize your settings.");
    Ok(path)
}

/// Print the effective configuration as TOML.
pub fn run_config(config: &Settings) -> Result<()> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| GraphError::Config(e.to_string()))
        .context("rendering configuration")?;
    println!("{rendered}");
    Ok(())
}
