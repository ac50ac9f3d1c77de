//! Submit Order Use Case
//!
//! Intake of a new order: validation, creation as `Pending`, the synchronous
//! round trip to matching, and the resulting transition.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::application::ports::{
    EventPublisherPort, MarginDecision, MarginRequest, MarketRegistryPort, MatchingPort,
    PositionPort, RiskCheckPort,
};
use crate::application::services::{OrderLockRegistry, dispatch_fill, publish_events};
use crate::domain::market::Market;
use crate::domain::order_lifecycle::{
    CheckedDraft, CreateOrderCommand, MatchDecision, Order, OrderDraft, OrderRepository,
    OrderStatus, OrderValidator, ValidationError,
};
use crate::error::{CollaboratorError, OrderServiceError};
use crate::observability;

/// Use case for submitting a new order.
pub struct SubmitOrderUseCase<O, M, K, R, P, E>
where
    O: OrderRepository,
    M: MatchingPort,
    K: MarketRegistryPort,
    R: RiskCheckPort,
    P: PositionPort + 'static,
    E: EventPublisherPort,
{
    orders: Arc<O>,
    matching: Arc<M>,
    markets: Arc<K>,
    risk: Arc<R>,
    positions: Arc<P>,
    event_publisher: Arc<E>,
    locks: Arc<OrderLockRegistry>,
    matching_timeout: Duration,
}

impl<O, M, K, R, P, E> SubmitOrderUseCase<O, M, K, R, P, E>
where
    O: OrderRepository,
    M: MatchingPort,
    K: MarketRegistryPort,
    R: RiskCheckPort,
    P: PositionPort + 'static,
    E: EventPublisherPort,
{
    /// Create a new SubmitOrderUseCase.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        orders: Arc<O>,
        matching: Arc<M>,
        markets: Arc<K>,
        risk: Arc<R>,
        positions: Arc<P>,
        event_publisher: Arc<E>,
        locks: Arc<OrderLockRegistry>,
        matching_timeout: Duration,
    ) -> Self {
        Self {
            orders,
            matching,
            markets,
            risk,
            positions,
            event_publisher,
            locks,
            matching_timeout,
        }
    }

    /// Submit an order and wait for the matching decision.
    ///
    /// # Errors
    ///
    /// Returns `Validation` before anything is persisted,
    /// `MatchingUnavailable` if the order was persisted but matching did not
    /// answer, or `Persistence` if the store failed.
    pub async fn execute(&self, draft: OrderDraft) -> Result<Order, OrderServiceError> {
        self.execute_with_cancel(draft, &CancellationToken::new())
            .await
    }

    /// Like [`Self::execute`], abandoning the wait when `cancel` fires.
    ///
    /// A cancellation while waiting for matching leaves the order `Pending`
    /// and reports `Cancelled { left_pending: true }`.
    ///
    /// # Errors
    ///
    /// See [`Self::execute`].
    #[tracing::instrument(
        name = "order.submit",
        skip(self, draft, cancel),
        fields(account_id = %draft.account_id, symbol = %draft.symbol, kind = %draft.kind)
    )]
    pub async fn execute_with_cancel(
        &self,
        draft: OrderDraft,
        cancel: &CancellationToken,
    ) -> Result<Order, OrderServiceError> {
        let kind_label = match draft.kind.as_str() {
            "market" | "limit" => draft.kind.clone(),
            _ => "unknown".to_string(),
        };

        let result = self.submit(&draft, cancel).await;

        let outcome = match &result {
            Ok(order) => order.status().as_str(),
            Err(e) => e.code().reason(),
        };
        observability::record_order_submission(&kind_label, outcome);

        match &result {
            Ok(order) => tracing::info!(
                order_id = %order.id(),
                status = %order.status(),
                "Order submitted"
            ),
            Err(e) => tracing::warn!(code = %e.code(), error = %e, "Order submission failed"),
        }

        result
    }

    async fn submit(
        &self,
        draft: &OrderDraft,
        cancel: &CancellationToken,
    ) -> Result<Order, OrderServiceError> {
        // 1. Structural checks, no collaborators touched
        let checked = OrderValidator::check_structure(draft)?;

        // 2. Market, leverage cap, margin
        let market = self.find_market(&checked, cancel).await?;
        let command = self.check_risk(&checked, &market, cancel).await?;

        // 3. Create and persist as Pending
        let mut order = Order::new(command);
        let _lock = self.locks.try_acquire(order.id())?;

        self.orders
            .save(&order)
            .await
            .map_err(|e| CollaboratorError::Persistence {
                operation: e.operation,
                message: e.message,
                order_id: Some(order.id().clone()),
                left_pending: false,
            })?;
        publish_events(self.event_publisher.as_ref(), &mut order).await;

        // 4. Ask matching, bounded by timeout and cancellation
        let decision = self.await_decision(&order, cancel).await?;

        // 5. Apply, persist again, then side effects
        let filled = order.apply_decision(&decision)?;
        self.orders
            .save(&order)
            .await
            .map_err(|e| CollaboratorError::Persistence {
                operation: e.operation,
                message: e.message,
                order_id: Some(order.id().clone()),
                left_pending: true,
            })?;
        observability::record_order_transition(
            OrderStatus::Pending.as_str(),
            order.status().as_str(),
        );

        publish_events(self.event_publisher.as_ref(), &mut order).await;
        dispatch_fill(&self.positions, &order, filled);

        Ok(order)
    }

    async fn find_market(
        &self,
        checked: &CheckedDraft,
        cancel: &CancellationToken,
    ) -> Result<Market, OrderServiceError> {
        let lookup = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(not_started()),
            lookup = self.markets.find_market(&checked.symbol) => lookup,
        };

        lookup
            .map_err(|e| CollaboratorError::MarketRegistryUnavailable {
                message: e.to_string(),
            })?
            .ok_or_else(|| {
                ValidationError::UnknownSymbol {
                    symbol: checked.symbol.to_string(),
                }
                .into()
            })
    }

    async fn check_risk(
        &self,
        checked: &CheckedDraft,
        market: &Market,
        cancel: &CancellationToken,
    ) -> Result<CreateOrderCommand, OrderServiceError> {
        let max = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(not_started()),
            max = self.risk.max_leverage(&checked.symbol) => max,
        }
        .map_err(|e| CollaboratorError::RiskUnavailable {
            message: e.to_string(),
        })?;
        let leverage = OrderValidator::check_leverage_cap(checked.leverage, max)?;

        let price = checked.effective_price(market.mark_price);
        let notional = checked.notional(price)?;
        let request = MarginRequest {
            account_id: checked.account_id.clone(),
            symbol: checked.symbol.clone(),
            side: checked.side,
            kind: checked.kind,
            size: checked.size,
            price,
            notional,
            leverage,
        };

        let decision = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(not_started()),
            decision = self.risk.check_margin(&request) => decision,
        }
        .map_err(|e| CollaboratorError::RiskUnavailable {
            message: e.to_string(),
        })?;

        if let MarginDecision::Denied { reason } = decision {
            return Err(ValidationError::InsufficientMargin { reason }.into());
        }

        Ok(CreateOrderCommand {
            account_id: request.account_id,
            symbol: request.symbol,
            side: request.side,
            kind: request.kind,
            size: request.size,
            price: request.price,
            leverage,
        })
    }

    async fn await_decision(
        &self,
        order: &Order,
        cancel: &CancellationToken,
    ) -> Result<MatchDecision, OrderServiceError> {
        let started = Instant::now();
        let answer = tokio::select! {
            biased;
            () = cancel.cancelled() => None,
            answer = tokio::time::timeout(
                self.matching_timeout,
                self.matching.submit_for_matching(order),
            ) => Some(answer),
        };
        let elapsed = started.elapsed().as_secs_f64();

        let unavailable = |reason: String| CollaboratorError::MatchingUnavailable {
            order_id: order.id().clone(),
            reason,
        };

        match answer {
            None => {
                observability::record_matching_latency("cancelled", elapsed);
                Err(OrderServiceError::Cancelled {
                    order_id: Some(order.id().clone()),
                    left_pending: true,
                })
            }
            Some(Err(_elapsed)) => {
                observability::record_matching_latency("timeout", elapsed);
                Err(unavailable(format!(
                    "no decision within {}ms",
                    self.matching_timeout.as_millis()
                ))
                .into())
            }
            Some(Ok(Err(e))) => {
                observability::record_matching_latency("error", elapsed);
                Err(unavailable(e.to_string()).into())
            }
            Some(Ok(Ok(decision))) => {
                observability::record_matching_latency("decided", elapsed);
                Ok(decision)
            }
        }
    }
}

const fn not_started() -> OrderServiceError {
    OrderServiceError::Cancelled {
        order_id: None,
        left_pending: false,
    }
}
