//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to application use cases.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::application::dto::OrderDto;
use crate::application::ports::{
    EventPublisherPort, MarketRegistryPort, MatchingPort, PositionPort, RiskCheckPort,
};
use crate::application::use_cases::{OrderDirectory, SubmitOrderUseCase, TransitionOrderUseCase};
use crate::domain::order_lifecycle::{CancelReason, OrderDraft, OrderRepository};
use crate::domain::shared::{OrderId, Timestamp};

use super::request::{
    AccountQuery, CancelOrderRequest, CreateOrderRequest, MatchDecisionRequest, OrderIdQuery,
};
use super::response::{ApiError, BANNER, HealthResponse, ok};

const HEALTH_PING_TIMEOUT: Duration = Duration::from_secs(2);

/// Application state shared across handlers.
pub struct AppState<O, M, K, R, P, E>
where
    O: OrderRepository,
    M: MatchingPort,
    K: MarketRegistryPort,
    R: RiskCheckPort,
    P: PositionPort + 'static,
    E: EventPublisherPort,
{
    /// Use case for submitting orders.
    pub submit: Arc<SubmitOrderUseCase<O, M, K, R, P, E>>,
    /// Use case for later decisions and cancellation.
    pub transition: Arc<TransitionOrderUseCase<O, P, E>>,
    /// Order lookups.
    pub directory: Arc<OrderDirectory<O>>,
    /// Order repository for health checks.
    pub order_repo: Arc<O>,
    /// Application version.
    pub version: String,
}

impl<O, M, K, R, P, E> Clone for AppState<O, M, K, R, P, E>
where
    O: OrderRepository,
    M: MatchingPort,
    K: MarketRegistryPort,
    R: RiskCheckPort,
    P: PositionPort + 'static,
    E: EventPublisherPort,
{
    fn clone(&self) -> Self {
        Self {
            submit: Arc::clone(&self.submit),
            transition: Arc::clone(&self.transition),
            directory: Arc::clone(&self.directory),
            order_repo: Arc::clone(&self.order_repo),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<O, M, K, R, P, E>(state: AppState<O, M, K, R, P, E>) -> Router
where
    O: OrderRepository + 'static,
    M: MatchingPort + 'static,
    K: MarketRegistryPort + 'static,
    R: RiskCheckPort + 'static,
    P: PositionPort + 'static,
    E: EventPublisherPort + 'static,
{
    Router::new()
        .route("/", get(banner))
        .route("/healthz", get(health_check))
        .route("/api/orders/create", post(create_order))
        .route("/api/orders/get", get(get_order))
        .route("/api/orders/user", get(get_user_orders))
        .route("/api/orders/cancel", post(cancel_order))
        .route("/api/orders/match", post(apply_match_decision))
        .with_state(state)
}

async fn banner() -> &'static str {
    BANNER
}

/// Health check endpoint.
async fn health_check<O, M, K, R, P, E>(
    State(state): State<AppState<O, M, K, R, P, E>>,
) -> impl IntoResponse
where
    O: OrderRepository,
    M: MatchingPort,
    K: MarketRegistryPort,
    R: RiskCheckPort,
    P: PositionPort + 'static,
    E: EventPublisherPort,
{
    let db_status = match tokio::time::timeout(HEALTH_PING_TIMEOUT, state.order_repo.ping()).await
    {
        Ok(Ok(())) => "up",
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Persistence ping failed");
            "down"
        }
        Err(_) => {
            tracing::warn!("Persistence ping timed out");
            "down"
        }
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Timestamp::now().to_rfc3339(),
        db_status: db_status.to_string(),
        version: state.version.clone(),
    })
}

/// Create order endpoint.
async fn create_order<O, M, K, R, P, E>(
    State(state): State<AppState<O, M, K, R, P, E>>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    O: OrderRepository,
    M: MatchingPort,
    K: MarketRegistryPort,
    R: RiskCheckPort,
    P: PositionPort + 'static,
    E: EventPublisherPort,
{
    let Json(request) = payload?;
    let order = state.submit.execute(OrderDraft::from(request)).await?;
    Ok(ok(OrderDto::from_order(&order)))
}

/// Get order by id endpoint.
async fn get_order<O, M, K, R, P, E>(
    State(state): State<AppState<O, M, K, R, P, E>>,
    query: Result<Query<OrderIdQuery>, QueryRejection>,
) -> Result<Response, ApiError>
where
    O: OrderRepository,
    M: MatchingPort,
    K: MarketRegistryPort,
    R: RiskCheckPort,
    P: PositionPort + 'static,
    E: EventPublisherPort,
{
    let Query(query) = query?;
    let order = state.directory.get_by_id(&query.id).await?;
    Ok(ok(OrderDto::from_order(&order)))
}

/// List orders by account endpoint.
async fn get_user_orders<O, M, K, R, P, E>(
    State(state): State<AppState<O, M, K, R, P, E>>,
    query: Result<Query<AccountQuery>, QueryRejection>,
) -> Result<Response, ApiError>
where
    O: OrderRepository,
    M: MatchingPort,
    K: MarketRegistryPort,
    R: RiskCheckPort,
    P: PositionPort + 'static,
    E: EventPublisherPort,
{
    let Query(query) = query?;
    let orders = state.directory.get_by_account(&query.user_id).await?;
    Ok(ok(orders.iter().map(OrderDto::from).collect::<Vec<_>>()))
}

/// Cancel order endpoint.
async fn cancel_order<O, M, K, R, P, E>(
    State(state): State<AppState<O, M, K, R, P, E>>,
    payload: Result<Json<CancelOrderRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    O: OrderRepository,
    M: MatchingPort,
    K: MarketRegistryPort,
    R: RiskCheckPort,
    P: PositionPort + 'static,
    E: EventPublisherPort,
{
    let Json(request) = payload?;
    let reason = request
        .reason
        .unwrap_or_else(CancelReason::user_requested);
    let order = state
        .transition
        .cancel(&OrderId::new(request.id.trim()), reason)
        .await?;
    Ok(ok(OrderDto::from_order(&order)))
}

/// Match decision callback endpoint.
async fn apply_match_decision<O, M, K, R, P, E>(
    State(state): State<AppState<O, M, K, R, P, E>>,
    payload: Result<Json<MatchDecisionRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    O: OrderRepository,
    M: MatchingPort,
    K: MarketRegistryPort,
    R: RiskCheckPort,
    P: PositionPort + 'static,
    E: EventPublisherPort,
{
    let Json(request) = payload?;
    let order = state
        .transition
        .apply_match_decision(&OrderId::new(request.id.trim()), request.decision)
        .await?;
    Ok(ok(OrderDto::from_order(&order)))
}
