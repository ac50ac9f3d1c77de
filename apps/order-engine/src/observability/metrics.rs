//! Prometheus metrics for the order engine.
//!
//! # Example
//!
//! ```ignore
//! use order_engine::observability::{init_metrics, MetricsConfig};
//!
//! let config = MetricsConfig::default();
//! init_metrics(&config)?;
//!
//! record_order_submission("limit", "filled");
//! ```

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Configuration for the metrics exporter.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Address to bind the metrics HTTP listener.
    pub listen_addr: SocketAddr,
    /// Histogram buckets for latency measurements (in seconds).
    pub latency_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 9090)),
            // Latency buckets from 1ms to 10s
            latency_buckets: vec![
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ],
        }
    }
}

impl MetricsConfig {
    /// Create a new metrics configuration with custom address.
    #[must_use]
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            listen_addr: addr,
            ..Default::default()
        }
    }
}

/// Initialize the Prometheus metrics exporter.
///
/// This starts an HTTP server that exposes metrics at `/metrics`.
///
/// # Errors
///
/// Returns an error if the metrics exporter fails to start (e.g., port already in use).
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(config.listen_addr)
        .set_buckets(&config.latency_buckets)
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(
        addr = %config.listen_addr,
        "Prometheus metrics exporter started"
    );

    Ok(())
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure metrics exporter.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

// ============================================================================
// Order Lifecycle Metrics
// ============================================================================

/// Record the outcome of one submission.
///
/// # Arguments
///
/// * `kind` - Order kind (`market`, `limit`, or `unknown` when unparsable)
/// * `outcome` - Final status or error code
pub fn record_order_submission(kind: &str, outcome: &str) {
    counter!(
        "order_submissions_total",
        "kind" => kind.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// Record an applied status transition.
pub fn record_order_transition(from: &str, to: &str) {
    counter!(
        "order_transitions_total",
        "from" => from.to_string(),
        "to" => to.to_string()
    )
    .increment(1);
}

/// Record how long the matching authority took to answer.
///
/// # Arguments
///
/// * `outcome` - `decided`, `error`, `timeout` or `cancelled`
/// * `latency_seconds` - Wall time spent waiting
pub fn record_matching_latency(outcome: &str, latency_seconds: f64) {
    histogram!(
        "order_matching_latency_seconds",
        "outcome" => outcome.to_string()
    )
    .record(latency_seconds);
}

/// Record a directory lookup.
///
/// # Arguments
///
/// * `by` - `id` or `account`
/// * `outcome` - `found`, `not_found` or an error code
pub fn record_order_lookup(by: &str, outcome: &str) {
    counter!(
        "order_lookups_total",
        "by" => by.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}
