//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_navigations_total` (counter): navigations by outcome
//! - `router_navigation_duration_seconds` (histogram): time to resolve a navigation
//! - `router_view_loads_total` (counter): module fetches by result
//! - `router_view_cache_hits_total` (counter): loads served from the cache
//! - `router_view_cache_resolved` (gauge): modules held in the cache
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op
//! - The Prometheus recorder is optional and rendered on demand

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

/// Install the Prometheus recorder as the global metrics recorder.
pub fn init_metrics() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            tracing::info!("Prometheus metrics recorder installed");
            Some(handle)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics recorder");
            None
        }
    }
}

pub fn record_navigation(outcome: &'static str, start: Instant) {
    counter!("router_navigations_total", "outcome" => outcome).increment(1);
    histogram!("router_navigation_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_view_load(result: &'static str, start: Instant) {
    counter!("router_view_loads_total", "result" => result).increment(1);
    histogram!("router_view_load_duration_seconds", "result" => result)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_view_cache_hit() {
    counter!("router_view_cache_hits_total").increment(1);
}

pub fn record_view_cache_size(resolved: usize) {
    gauge!("router_view_cache_resolved").set(resolved as f64);
}
