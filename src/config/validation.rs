//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (every proxied tool has a backend)
//! - Validate value ranges (intervals > 0, probabilities in [0, 1])
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: HarnessConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::{HarnessConfig, PROXY_MANAGER_KEY};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("tool '{0}' has a proxy but no service entry")]
    MissingService(String),

    #[error("tool '{0}' has proxy port 0")]
    ZeroProxyPort(String),

    #[error("no 'proxy_mgr' service entry")]
    MissingProxyManager,

    #[error("service '{name}' address '{address}' is not host:port")]
    BadAddress { name: String, address: String },

    #[error("interval '{0}' must be greater than zero")]
    ZeroInterval(&'static str),

    #[error("probability '{name}' must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("limit '{name}' must not be negative, got {value}")]
    NegativeLimit { name: &'static str, value: i64 },

    #[error("proxy host must not be empty")]
    EmptyProxyHost,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &HarnessConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let topology = &config.topology;

    if topology.proxy_host.trim().is_empty() {
        errors.push(ValidationError::EmptyProxyHost);
    }

    for (tool, port) in &topology.proxies {
        if *port == 0 {
            errors.push(ValidationError::ZeroProxyPort(tool.clone()));
        }
        if !topology.services.contains_key(tool) {
            errors.push(ValidationError::MissingService(tool.clone()));
        }
    }

    if !topology.services.contains_key(PROXY_MANAGER_KEY) {
        errors.push(ValidationError::MissingProxyManager);
    }

    for (name, address) in &topology.services {
        if !is_host_port(address) {
            errors.push(ValidationError::BadAddress {
                name: name.clone(),
                address: address.clone(),
            });
        }
    }

    let intervals = &topology.intervals;
    if intervals.proxy_check_interval_secs == 0 {
        errors.push(ValidationError::ZeroInterval("proxy_check_interval"));
    }
    if intervals.proxy_timeout_secs == 0 {
        errors.push(ValidationError::ZeroInterval("proxy_timeout"));
    }

    let faults = &config.faults;
    for (name, value) in [("toxic_prob", faults.toxic_prob), ("error_prob", faults.error_prob)] {
        if !(0.0..=1.0).contains(&value) {
            errors.push(ValidationError::ProbabilityOutOfRange { name, value });
        }
    }
    for (name, value) in [("tool_limit", faults.tool_limit), ("prompt_limit", faults.prompt_limit)] {
        if value < 0 {
            errors.push(ValidationError::NegativeLimit { name, value });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_host_port(address: &str) -> bool {
    match address.rsplit_once(':') {
        Some((host, port)) => !host.is_empty() && port.parse::<u16>().is_ok(),
        None => false,
    }
}
