//! Metrics collection and exposition.
//!
//! # Metrics
//! - `logging_ui_http_requests_total` (counter): requests by method, status
//! - `logging_ui_http_request_duration_seconds` (histogram): latency
//! - `logging_ui_level_changes_total` (counter): level changes by new level
//! - `logging_ui_known_loggers` (gauge): registry size at last listing
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::registry::LevelChange;

/// Install the Prometheus recorder with its own scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Prometheus exporter listening");
    Ok(())
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    let method = method.to_string();
    let status = status.to_string();
    counter!(
        "logging_ui_http_requests_total",
        "method" => method.clone(),
        "status" => status.clone()
    )
    .increment(1);
    histogram!(
        "logging_ui_http_request_duration_seconds",
        "method" => method,
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());
}

/// Labelled by the new level only; logger names are client-supplied.
pub fn record_level_change(change: &LevelChange) {
    let level = change.current.map_or("inherit", |level| level.as_str());
    counter!("logging_ui_level_changes_total", "level" => level).increment(1);
}

pub fn record_known_loggers(count: usize) {
    gauge!("logging_ui_known_loggers").set(count as f64);
}
