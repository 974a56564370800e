//! # Configuration Loader
//!
//! Reads a TOML file and maps it onto [`AppConfig`]. Loading is pure: empty
//! strings and missing sections are accepted as they are. Filling in paths
//! that were left empty is the job of [`super::wiring`].

use anyhow::Context;
use std::path::PathBuf;

use sn_core::config::{AppConfig, SimulationConfig};

/// Default simulated user input when no config file is given.
const DEFAULT_POSTCODE: &str = "SW1";

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Load the given file, or fall back to [`default_config`] when no path was given.
pub fn resolve_config(config_path: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    match config_path {
        Some(path) => load_config(path),
        None => Ok(default_config()),
    }
}

/// Configuration used when the binary runs without a config file: a
/// cooperative simulated user on a device that has never been asked anything.
pub fn default_config() -> AppConfig {
    AppConfig {
        simulation: SimulationConfig {
            grant_on_request: true,
            postcode: DEFAULT_POSTCODE.to_string(),
            ..SimulationConfig::default()
        },
        ..AppConfig::default()
    }
}
