//! Order Engine Binary
//!
//! Starts the order intake and lifecycle HTTP service.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin order-engine
//! ```
//!
//! # Environment Variables
//!
//! - `ORDER_ENGINE_CONFIG`: Path to the YAML config (default: config.yaml)
//! - `HTTP_PORT`: Overrides `server.http_port`
//! - `RUST_LOG`: Log filter (default: `observability.logging.level`)
//! - `OTEL_ENABLED`: Set to `true` to export traces over OTLP

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use order_engine::application::ports::NoOpEventPublisher;
use order_engine::config::{AccountSeed, Config, load_config};
use order_engine::infrastructure::config::Container;
use order_engine::infrastructure::http::create_router;
use order_engine::infrastructure::market::StaticMarketRegistry;
use order_engine::infrastructure::matching::ImmediateFillMatcher;
use order_engine::infrastructure::persistence::InMemoryOrderRepository;
use order_engine::infrastructure::positions::NoOpPositionSink;
use order_engine::infrastructure::risk::LeverageCapRiskCheck;
use order_engine::observability::{MetricsConfig, init_metrics};
use order_engine::telemetry::init_telemetry;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;

/// Graceful shutdown timeout.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Concrete container for the single-process deployment.
type EngineContainer = Container<
    InMemoryOrderRepository,
    ImmediateFillMatcher,
    StaticMarketRegistry,
    LeverageCapRiskCheck,
    NoOpPositionSink,
    NoOpEventPublisher,
>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config = load_config(None).context("failed to load configuration")?;
    let _telemetry = init_telemetry(&config.observability.logging);

    tracing::info!("Starting Order Engine");
    log_config(&config);

    if config.observability.metrics.enabled {
        let metrics_addr = SocketAddr::new(
            config.server.socket_addr()?.ip(),
            config.observability.metrics.port,
        );
        init_metrics(&MetricsConfig::with_addr(metrics_addr))
            .context("failed to start metrics exporter")?;
        tracing::info!(%metrics_addr, "Metrics exporter listening");
    }

    let container = create_container(&config);
    let shutdown_token = CancellationToken::new();

    serve(&config, &container, shutdown_token.clone()).await?;

    tracing::info!("Order engine stopped");
    Ok(())
}

/// Load .env file from current directory or any ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Log the loaded configuration.
fn log_config(config: &Config) {
    tracing::info!(
        http_port = config.server.http_port,
        matching_timeout_ms = config.matching.timeout_ms,
        lookup_timeout_ms = config.lookup.timeout_ms,
        default_max_leverage = config.risk.default_max_leverage,
        markets = config.markets.len(),
        accounts = config.accounts.len(),
        "Configuration loaded"
    );
}

/// Wire adapters into the container.
fn create_container(config: &Config) -> EngineContainer {
    let markets = StaticMarketRegistry::new(config.markets.iter().cloned());
    for symbol in markets.symbols() {
        tracing::debug!(%symbol, "Market listed");
    }

    let risk = LeverageCapRiskCheck::new(
        config.risk.default_max_leverage,
        config
            .risk
            .caps
            .iter()
            .map(|(symbol, cap)| (symbol.clone(), *cap)),
    )
    .with_accounts(config.accounts.iter().map(AccountSeed::to_account));

    Container::new(
        Arc::new(InMemoryOrderRepository::new()),
        Arc::new(ImmediateFillMatcher::new()),
        Arc::new(markets),
        Arc::new(risk),
        Arc::new(NoOpPositionSink),
        Arc::new(NoOpEventPublisher),
        config.matching.timeout(),
        config.lookup.timeout(),
    )
}

/// Run the HTTP server until a shutdown signal arrives.
async fn serve(
    config: &Config,
    container: &EngineContainer,
    shutdown_token: CancellationToken,
) -> anyhow::Result<()> {
    let app = create_router(container.app_state(env!("CARGO_PKG_VERSION")));
    let http_addr = config.server.socket_addr()?;

    tracing::info!(%http_addr, "HTTP server starting");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /");
    tracing::info!("  GET  /healthz");
    tracing::info!("  POST /api/orders/create");
    tracing::info!("  GET  /api/orders/get?id=");
    tracing::info!("  GET  /api/orders/user?userId=");
    tracing::info!("  POST /api/orders/cancel");
    tracing::info!("  POST /api/orders/match");

    let listener = TcpListener::bind(http_addr)
        .await
        .with_context(|| format!("failed to bind {http_addr}"))?;

    tokio::spawn(shutdown_signal(shutdown_token.clone()));

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_token.clone().cancelled_owned())
        .into_future();

    tokio::select! {
        result = server => result.context("HTTP server error")?,
        () = drain_deadline(shutdown_token) => {
            tracing::warn!(
                timeout_secs = SHUTDOWN_TIMEOUT.as_secs(),
                "Graceful shutdown timed out, dropping open connections"
            );
        }
    }

    Ok(())
}

/// Resolves `SHUTDOWN_TIMEOUT` after shutdown starts.
async fn drain_deadline(shutdown_token: CancellationToken) {
    shutdown_token.cancelled().await;
    tokio::time::sleep(SHUTDOWN_TIMEOUT).await;
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// # Panics
///
/// Panics if signal handlers cannot be installed.
#[allow(clippy::expect_used)]
async fn shutdown_signal(shutdown_token: CancellationToken) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }

    shutdown_token.cancel();

    tracing::info!(
        timeout_secs = SHUTDOWN_TIMEOUT.as_secs(),
        "Graceful shutdown started"
    );
}
