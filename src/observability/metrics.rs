//! Metrics collection and exposition.
//!
//! # Metrics
//! - `chaos_probe_total` (counter): single probes by target, outcome
//! - `chaos_target_up` (gauge): 1=last probe up, 0=down
//! - `chaos_availability_checks_total` (counter): `active` calls by target, result
//! - `chaos_classifications_total` (counter): classified failures by category
//!
//! Recording is a no-op until a recorder is installed.

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::classify::ErrorCategory;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

fn outcome(up: bool) -> &'static str {
    if up {
        "up"
    } else {
        "down"
    }
}

pub fn record_probe(target: &str, up: bool) {
    counter!("chaos_probe_total", "target" => target.to_string(), "outcome" => outcome(up)).increment(1);
    gauge!("chaos_target_up", "target" => target.to_string()).set(if up { 1.0 } else { 0.0 });
}

pub fn record_availability(target: &str, up: bool) {
    counter!("chaos_availability_checks_total", "target" => target.to_string(), "result" => outcome(up))
        .increment(1);
}

pub fn record_classification(category: ErrorCategory) {
    counter!("chaos_classifications_total", "category" => category.as_str()).increment(1);
}
