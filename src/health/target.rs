//! What a liveness probe points at.

use std::fmt;

use crate::config::schema::PROXY_MANAGER_KEY;

/// A probe target: the proxy manager or a tool's fault proxy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// The service that configures the fault proxies, probed at `/health`.
    ProxyManager,
    /// A tool's proxy, probed at the root of its listen port.
    Tool(String),
}

impl Target {
    pub fn tool(name: impl Into<String>) -> Self {
        Target::Tool(name.into())
    }

    /// Build a target from an optional tool name; `None` means the proxy manager.
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some(name) => Target::tool(name),
            None => Target::ProxyManager,
        }
    }

    /// Short label used in logs and metrics.
    pub fn label(&self) -> &str {
        match self {
            Target::ProxyManager => PROXY_MANAGER_KEY,
            Target::Tool(name) => name,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::ProxyManager => write!(f, "proxy manager"),
            Target::Tool(name) => write!(f, "{} proxy", name),
        }
    }
}
