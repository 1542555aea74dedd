//! Single-shot liveness probes.
//!
//! # Responsibilities
//! - Resolve a [`Target`] to its health URL
//! - Issue one GET with a fixed timeout
//! - Fold every failure into `false`
//!
//! # Design Decisions
//! - Only `200 OK` counts as up
//! - Timeouts and refused connections log at `warn`
//! - Anything else (unknown tool, bad URL, protocol error) logs at `error`

use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use crate::config::Topology;
use crate::health::target::Target;
use crate::observability::metrics;

/// Something that can tell whether a target is up.
pub trait Probe: Send + Sync {
    fn probe(&self, target: &Target) -> impl Future<Output = bool> + Send;
}

/// Failure resolving a target to a URL.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("no proxy port configured for tool '{0}'")]
    UnknownTool(String),

    #[error("no proxy manager address configured")]
    NoProxyManager,

    #[error("invalid health URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// HTTP probe against the fault proxies and the proxy manager.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
    proxy_host: String,
    proxies: BTreeMap<String, u16>,
    manager_addr: Option<String>,
}

impl HttpProbe {
    /// Create a probe using the topology's probe timeout.
    pub fn new(topology: &Topology) -> Result<Self, reqwest::Error> {
        Self::with_timeout(topology, topology.intervals.probe_timeout())
    }

    /// Create a probe with an explicit per-request timeout.
    pub fn with_timeout(topology: &Topology, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()?;

        Ok(Self {
            client,
            proxy_host: topology.proxy_host.clone(),
            proxies: topology.proxies.clone(),
            manager_addr: topology.proxy_manager_addr().map(str::to_string),
        })
    }

    /// Health endpoint for a target.
    pub fn health_url(&self, target: &Target) -> Result<Url, ProbeError> {
        let raw = match target {
            Target::ProxyManager => {
                let addr = self.manager_addr.as_deref().ok_or(ProbeError::NoProxyManager)?;
                format!("http://{}/health", addr)
            }
            Target::Tool(name) => {
                let port = self
                    .proxies
                    .get(name)
                    .ok_or_else(|| ProbeError::UnknownTool(name.clone()))?;
                format!("http://{}:{}/", self.proxy_host, port)
            }
        };
        Ok(Url::parse(&raw)?)
    }

    async fn check(&self, target: &Target) -> bool {
        let url = match self.health_url(target) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(target_id = %target, error = %e, "Error checking status");
                return false;
            }
        };

        match self.client.get(url).send().await {
            Ok(response) => {
                let up = response.status() == StatusCode::OK;
                if !up {
                    tracing::debug!(target_id = %target, status = %response.status(), "Health check failed: non-200 status");
                }
                up
            }
            Err(e) if e.is_timeout() || e.is_connect() => {
                tracing::warn!(target_id = %target, error = %e, "Target not responding in time");
                false
            }
            Err(e) => {
                tracing::error!(target_id = %target, error = %e, "Error checking status");
                false
            }
        }
    }
}

impl Probe for HttpProbe {
    fn probe(&self, target: &Target) -> impl Future<Output = bool> + Send {
        async move {
            let up = self.check(target).await;
            metrics::record_probe(target.label(), up);
            up
        }
    }
}
