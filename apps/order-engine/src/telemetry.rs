//! Tracing Setup
//!
//! Installs the `tracing` subscriber: an `EnvFilter`, a JSON or pretty
//! console layer, and an optional OpenTelemetry OTLP layer.
//!
//! # Configuration
//!
//! - `RUST_LOG`: Filter directives (default: `observability.logging.level`)
//! - `OTEL_ENABLED`: Set to `true` to export spans over OTLP
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP gRPC endpoint (default: `http://localhost:4317`)
//! - `OTEL_SERVICE_NAME`: Service name for traces (default: `order-engine`)
//!
//! # Usage
//!
//! ```rust,ignore
//! use order_engine::telemetry::init_telemetry;
//!
//! #[tokio::main]
//! async fn main() {
//!     let _guard = init_telemetry(&config.observability.logging);
//!     // ... application code
//! }
//! ```

use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

const DEFAULT_ENDPOINT: &str = "http://localhost:4317";
const DEFAULT_SERVICE_NAME: &str = "order-engine";

/// Guard that shuts down the tracer provider on drop.
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("Error shutting down tracer provider: {e:?}");
        }
    }
}

/// Initialize the global subscriber.
///
/// Returns a guard that will shut down the tracer provider when dropped.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
#[must_use]
pub fn init_telemetry(logging: &LoggingConfig) -> TelemetryGuard {
    let env_filter = build_env_filter(std::env::var("RUST_LOG").ok().as_deref(), &logging.level);

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if logging.format == "pretty" {
        tracing_subscriber::fmt::layer().pretty().with_ansi(true).boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .boxed()
    };

    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string());
    let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

    let provider = if otel_enabled(std::env::var("OTEL_ENABLED").ok().as_deref()) {
        build_provider(&endpoint)
    } else {
        None
    };

    let otel_layer = provider.as_ref().map(|p| {
        tracing_opentelemetry::layer().with_tracer(p.tracer(service_name.clone()))
    });

    Registry::default()
        .with(fmt_layer)
        .with(env_filter)
        .with(otel_layer)
        .init();

    if provider.is_some() {
        tracing::info!(
            service_name = %service_name,
            endpoint = %endpoint,
            "OpenTelemetry initialized"
        );
    } else {
        tracing::info!("OpenTelemetry disabled, using console logging only");
    }

    TelemetryGuard { provider }
}

fn build_provider(endpoint: &str) -> Option<SdkTracerProvider> {
    match opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
    {
        Ok(exporter) => Some(
            SdkTracerProvider::builder()
                .with_simple_exporter(exporter)
                .build(),
        ),
        Err(e) => {
            eprintln!("Failed to create OTLP exporter: {e:?}, falling back to console logging");
            None
        }
    }
}

/// `RUST_LOG` wins; otherwise the configured level, then `info`.
fn build_env_filter(rust_log: Option<&str>, default_level: &str) -> EnvFilter {
    rust_log
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .or_else(|| EnvFilter::try_new(default_level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn otel_enabled(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true") || v == "1")
}
