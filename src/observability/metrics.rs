//! Metrics collection and exposition.
//!
//! # Metrics
//! - `ban_check_requests_total` (counter): requests by route, status
//! - `ban_check_request_duration_seconds` (histogram): latency by route
//! - `ban_check_upstream_calls_total` (counter): upstream calls by service, outcome
//! - `ban_check_cache_lookups_total` (counter): account cache hits and misses
//! - `ban_check_cache_entries` (gauge): resident account cache entries
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(route: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "ban_check_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("ban_check_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_upstream_call(service: &'static str, outcome: &'static str) {
    metrics::counter!(
        "ban_check_upstream_calls_total",
        "service" => service,
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_cache_lookup(hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    metrics::counter!("ban_check_cache_lookups_total", "result" => result).increment(1);
}

pub fn record_cache_size(size: usize) {
    metrics::gauge!("ban_check_cache_entries").set(size as f64);
}
