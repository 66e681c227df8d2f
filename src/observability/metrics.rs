//! Metrics collection and exposition.
//!
//! # Metrics
//! - `mesh_requests_total` (counter): requests by service, operation, status
//! - `mesh_request_duration_seconds` (histogram): handler latency
//! - `mesh_upstream_requests_total` (counter): upstream calls by outcome
//!
//! Without an installed recorder the macros are no-ops, so handlers
//! record unconditionally.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(service: &'static str, operation: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "mesh_requests_total",
        "service" => service,
        "operation" => operation,
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "mesh_request_duration_seconds",
        "service" => service,
        "operation" => operation
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of one upstream call.
pub fn record_upstream(operation: &str, outcome: &'static str) {
    metrics::counter!(
        "mesh_upstream_requests_total",
        "operation" => operation.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}
