//! Metrics collection and Prometheus export.

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the metrics recorder.
///
/// This must be called once at startup before any metrics are recorded.
/// Panics if called more than once.
pub fn init_metrics() {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    if METRICS_HANDLE.set(handle).is_err() {
        panic!("failed to set metrics handle: already initialized");
    }
}

/// Get the current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Count a store operation by outcome (`ok`, `not_found`, `error`).
pub fn record_operation(operation: &str, outcome: &str) {
    counter!(
        "product_operations_total",
        "operation" => operation.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// Count a response served from the sample set.
pub fn record_fallback(endpoint: &str) {
    counter!("product_fallback_total", "endpoint" => endpoint.to_string()).increment(1);
}
