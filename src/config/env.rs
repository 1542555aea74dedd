//! Environment-derived fault-injection parameters.
//!
//! Values are read once at startup and layered over the configured ones,
//! key by key. A variable that is unset or does not parse as its declared
//! type leaves the configured value (or the built-in default) in place.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const TOXIC_PROB_VAR: &str = "TOXIC_PROB";
pub const TOOL_LIMIT_VAR: &str = "TOOL_LIMIT";
pub const PROMPT_LIMIT_VAR: &str = "PROMPT_LIMIT";
pub const ERROR_PROB_VAR: &str = "ERROR_PROB";

/// Fault-injection knobs consumed by the surrounding harness.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FaultParams {
    /// Probability that a toxic is attached to a proxy.
    pub toxic_prob: f64,

    /// Tool calls allowed per prompt.
    pub tool_limit: i64,

    /// Prompts replayed per run.
    pub prompt_limit: i64,

    /// Probability that a tool answers with an error.
    pub error_prob: f64,
}

impl Default for FaultParams {
    fn default() -> Self {
        Self {
            toxic_prob: 0.1,
            tool_limit: 1,
            prompt_limit: 1,
            error_prob: 0.1,
        }
    }
}

impl FaultParams {
    /// Built-in defaults overlaid with the process environment.
    pub fn from_env() -> Self {
        Self::default().overlay_env()
    }

    /// Built-in defaults overlaid through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::default().overlay(lookup)
    }

    /// These parameters overlaid with the process environment.
    pub fn overlay_env(&self) -> Self {
        self.overlay(|key| std::env::var(key).ok())
    }

    /// These parameters with every key `lookup` can parse replaced.
    pub fn overlay<F>(&self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            toxic_prob: parse_or(&lookup, TOXIC_PROB_VAR, self.toxic_prob),
            tool_limit: parse_or(&lookup, TOOL_LIMIT_VAR, self.tool_limit),
            prompt_limit: parse_or(&lookup, PROMPT_LIMIT_VAR, self.prompt_limit),
            error_prob: parse_or(&lookup, ERROR_PROB_VAR, self.error_prob),
        }
    }
}

/// Parse `key` as `T`, falling back to `default` when unset or malformed.
pub fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };

    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(key, value = %raw, "Unparsable environment value, keeping configured value");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let params = FaultParams::from_lookup(|_| None);
        assert_eq!(params, FaultParams::default());
        assert_eq!(params.toxic_prob, 0.1);
        assert_eq!(params.tool_limit, 1);
    }

    #[test]
    fn test_reads_valid_values() {
        let params = FaultParams::from_lookup(lookup_from(&[
            ("TOXIC_PROB", "0.75"),
            ("TOOL_LIMIT", " 4 "),
            ("PROMPT_LIMIT", "12"),
            ("ERROR_PROB", "0"),
        ]));

        assert_eq!(params.toxic_prob, 0.75);
        assert_eq!(params.tool_limit, 4);
        assert_eq!(params.prompt_limit, 12);
        assert_eq!(params.error_prob, 0.0);
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let params = FaultParams::from_lookup(lookup_from(&[
            ("TOXIC_PROB", "very toxic"),
            ("TOOL_LIMIT", "1.5"),
            ("ERROR_PROB", ""),
        ]));

        assert_eq!(params.toxic_prob, 0.1);
        assert_eq!(params.tool_limit, 1);
        assert_eq!(params.error_prob, 0.1);
    }

    #[test]
    fn test_overlay_keeps_configured_values_for_unset_keys() {
        let configured = FaultParams {
            toxic_prob: 0.5,
            tool_limit: 3,
            prompt_limit: 7,
            error_prob: 0.25,
        };

        let merged = configured.overlay(lookup_from(&[("TOOL_LIMIT", "9"), ("ERROR_PROB", "nope")]));

        assert_eq!(merged.toxic_prob, 0.5);
        assert_eq!(merged.tool_limit, 9);
        assert_eq!(merged.prompt_limit, 7);
        assert_eq!(merged.error_prob, 0.25);
    }
}
