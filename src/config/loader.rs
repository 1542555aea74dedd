//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::HarnessConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<HarnessConfig, ConfigError> {
    let config: HarnessConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<HarnessConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;

    tracing::debug!(path = ?path, tools = config.topology.proxies.len(), "Configuration file loaded");
    Ok(config)
}

/// Layer fault parameters from `lookup` over the configured ones, then validate the result.
pub fn apply_fault_overrides<F>(mut config: HarnessConfig, lookup: F) -> Result<HarnessConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    config.faults = config.faults.overlay(lookup);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load the file (or the built-in defaults) and apply the process environment on top.
pub fn resolve_config(path: Option<&Path>) -> Result<HarnessConfig, ConfigError> {
    let config = match path {
        Some(path) => load_config(path)?,
        None => HarnessConfig::default(),
    };
    apply_fault_overrides(config, |key| std::env::var(key).ok())
}
