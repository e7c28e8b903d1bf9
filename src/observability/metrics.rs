//! Metrics collection and exposition.
//!
//! # Metrics
//! - `remote_config_fetch_total` (counter): fetch outcomes by `outcome`
//! - `remote_config_fetch_duration_seconds` (histogram): transport latency
//! - `remote_config_local_io_total` (counter): local cache reads/writes by `op`, `outcome`
//! - `remote_config_entries` (gauge): number of registered entries
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - The Prometheus exporter is only started by the binary

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Outcome label for a single `invalidate` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// 2xx with a parseable body; content replaced.
    Updated,
    /// Non-2xx status.
    NotModified,
    /// Transport failure absorbed or propagated.
    Unavailable,
    /// Body was neither structured data nor text.
    Unsupported,
    /// Malformed body or unexpected failure.
    Error,
}

impl FetchOutcome {
    fn as_label(self) -> &'static str {
        match self {
            FetchOutcome::Updated => "updated",
            FetchOutcome::NotModified => "not_modified",
            FetchOutcome::Unavailable => "unavailable",
            FetchOutcome::Unsupported => "unsupported",
            FetchOutcome::Error => "error",
        }
    }
}

/// Install the Prometheus recorder with an HTTP scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

pub fn record_fetch(outcome: FetchOutcome, start: Instant) {
    metrics::counter!("remote_config_fetch_total", "outcome" => outcome.as_label()).increment(1);
    metrics::histogram!("remote_config_fetch_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}

pub fn record_local_io(op: &'static str, success: bool) {
    let outcome = if success { "ok" } else { "failed" };
    metrics::counter!("remote_config_local_io_total", "op" => op, "outcome" => outcome)
        .increment(1);
}

pub fn record_entries(count: usize) {
    metrics::gauge!("remote_config_entries").set(count as f64);
}
