//! Observability module for metrics.
//!
//! Tracing and log formatting live in [`crate::telemetry`].

mod metrics;

pub use metrics::{
    MetricsConfig, MetricsError, init_metrics, record_matching_latency, record_order_lookup,
    record_order_submission, record_order_transition,
};
