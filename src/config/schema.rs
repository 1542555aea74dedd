//! Configuration schema definitions.
//!
//! This module defines the harness topology: which port fronts each tool's
//! fault proxy, where each backend lives, and the timing and file tables the
//! surrounding harness reads. All types derive Serde traits for
//! deserialization from config files.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::env::FaultParams;

/// Service table key under which the proxy manager is registered.
pub const PROXY_MANAGER_KEY: &str = "proxy_mgr";

/// Root configuration for the harness.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HarnessConfig {
    /// Proxy, service, interval and file tables.
    pub topology: Topology,

    /// Fault-injection parameters. Environment variables override them per key.
    pub faults: FaultParams,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Static topology of the chaos harness.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Topology {
    /// Host the fault proxies listen on.
    pub proxy_host: String,

    /// Tool name → proxy listen port.
    pub proxies: BTreeMap<String, u16>,

    /// Tool name → backend `host:port`, plus the proxy manager entry.
    pub services: BTreeMap<String, String>,

    /// Wait, poll and timeout values.
    pub intervals: IntervalConfig,

    /// Files consumed by the harness.
    pub files: FileConfig,
}

/// The tables a caller can ask [`Topology::default_items`] for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Proxy,
    Services,
    Intervals,
    Files,
}

/// Borrowed view of a single topology table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SectionView<'a> {
    Proxy(&'a BTreeMap<String, u16>),
    Services(&'a BTreeMap<String, String>),
    Intervals(&'a IntervalConfig),
    Files(&'a FileConfig),
}

impl Topology {
    /// Proxy port for a tool, if the tool is known.
    pub fn proxy_port(&self, tool: &str) -> Option<u16> {
        self.proxies.get(tool).copied()
    }

    /// Backend address for a service name.
    pub fn service_addr(&self, name: &str) -> Option<&str> {
        self.services.get(name).map(String::as_str)
    }

    /// Address of the proxy manager's health server.
    pub fn proxy_manager_addr(&self) -> Option<&str> {
        self.service_addr(PROXY_MANAGER_KEY)
    }

    /// Names of every tool fronted by a proxy.
    pub fn tools(&self) -> impl Iterator<Item = &str> {
        self.proxies.keys().map(String::as_str)
    }

    /// Return the requested tables in the order they were asked for.
    pub fn default_items(&self, sections: &[Section]) -> Vec<SectionView<'_>> {
        sections
            .iter()
            .map(|section| match section {
                Section::Proxy => SectionView::Proxy(&self.proxies),
                Section::Services => SectionView::Services(&self.services),
                Section::Intervals => SectionView::Intervals(&self.intervals),
                Section::Files => SectionView::Files(&self.files),
            })
            .collect()
    }

    /// All four tables: proxies, services, intervals, files.
    pub fn all_defaults(
        &self,
    ) -> (
        &BTreeMap<String, u16>,
        &BTreeMap<String, String>,
        &IntervalConfig,
        &FileConfig,
    ) {
        (&self.proxies, &self.services, &self.intervals, &self.files)
    }
}

impl Default for Topology {
    fn default() -> Self {
        let tools: [(&str, u16, &str); 7] = [
            ("search", 6000, "search_tool:5000"),
            ("weather", 6001, "weather_tool:5001"),
            ("movie", 6002, "movie_tool:5002"),
            ("calendar", 6003, "calendar_tool:5003"),
            ("calculator", 6004, "calculator_tool:5004"),
            ("message", 6005, "message_tool:5005"),
            ("translator", 6006, "translator_tool:5006"),
        ];

        let proxies = tools
            .iter()
            .map(|(name, port, _)| (name.to_string(), *port))
            .collect();

        let mut services: BTreeMap<String, String> = tools
            .iter()
            .map(|(name, _, addr)| (name.to_string(), addr.to_string()))
            .collect();
        services.insert(PROXY_MANAGER_KEY.to_string(), "proxy_mgr:8000".to_string());

        Self {
            proxy_host: "toxiproxy".to_string(),
            proxies,
            services,
            intervals: IntervalConfig::default(),
            files: FileConfig::default(),
        }
    }
}

/// Timing table, all values in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct IntervalConfig {
    /// Delay between liveness polls.
    #[serde(alias = "proxy_check_interval")]
    pub proxy_check_interval_secs: u64,

    /// Wait budget for a tool proxy.
    #[serde(alias = "proxy_wait")]
    pub proxy_wait_secs: u64,

    /// Wait budget for the proxy manager.
    #[serde(alias = "proxy_mgr_wait")]
    pub proxy_mgr_wait_secs: u64,

    /// Per-probe HTTP timeout.
    #[serde(alias = "proxy_timeout")]
    pub proxy_timeout_secs: u64,

    /// Timeout used when a tool is called without its proxy.
    #[serde(alias = "fallback_timeout")]
    pub fallback_timeout_secs: u64,
}

impl IntervalConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.proxy_check_interval_secs)
    }

    pub fn proxy_wait(&self) -> Duration {
        Duration::from_secs(self.proxy_wait_secs)
    }

    pub fn proxy_mgr_wait(&self) -> Duration {
        Duration::from_secs(self.proxy_mgr_wait_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.proxy_timeout_secs)
    }

    pub fn fallback_timeout(&self) -> Duration {
        Duration::from_secs(self.fallback_timeout_secs)
    }
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self {
            proxy_check_interval_secs: 3,
            proxy_wait_secs: 30,
            proxy_mgr_wait_secs: 40,
            proxy_timeout_secs: 5,
            fallback_timeout_secs: 10,
        }
    }
}

/// File table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FileConfig {
    /// Prompt set replayed against the agent.
    pub prompts: PathBuf,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            prompts: PathBuf::from("prompts.json"),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_topology_tables() {
        let topology = Topology::default();

        assert_eq!(topology.proxy_port("search"), Some(6000));
        assert_eq!(topology.proxy_port("translator"), Some(6006));
        assert_eq!(topology.proxy_port("unknown"), None);
        assert_eq!(topology.service_addr("calculator"), Some("calculator_tool:5004"));
        assert_eq!(topology.proxy_manager_addr(), Some("proxy_mgr:8000"));
        assert_eq!(topology.tools().count(), 7);
        assert_eq!(topology.files.prompts, PathBuf::from("prompts.json"));
        assert_eq!(topology.intervals.poll_interval(), Duration::from_secs(3));
        assert_eq!(topology.intervals.proxy_mgr_wait(), Duration::from_secs(40));
    }

    #[test]
    fn test_default_items_keeps_requested_order() {
        let topology = Topology::default();
        let items = topology.default_items(&[Section::Files, Section::Proxy]);

        assert_eq!(items.len(), 2);
        assert!(matches!(items[0], SectionView::Files(files) if files.prompts == PathBuf::from("prompts.json")));
        assert!(matches!(items[1], SectionView::Proxy(proxies) if proxies.len() == 7));
    }

    #[test]
    fn test_interval_aliases() {
        let intervals: IntervalConfig = toml::from_str(
            "proxy_check_interval = 1\nproxy_wait = 2\nproxy_timeout_secs = 7",
        )
        .unwrap();

        assert_eq!(intervals.proxy_check_interval_secs, 1);
        assert_eq!(intervals.proxy_wait_secs, 2);
        assert_eq!(intervals.proxy_timeout_secs, 7);
        assert_eq!(intervals.proxy_mgr_wait_secs, 40);
    }
}
