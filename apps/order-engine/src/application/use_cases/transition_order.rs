//! Transition Order Use Case
//!
//! Applies later matching decisions and cancellations to existing orders.
//! Transitions on one order are serialized through [`OrderLockRegistry`],
//! and the order is re-read under the lock so a late attempt sees the
//! winner's terminal state.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::application::ports::{EventPublisherPort, PositionPort};
use crate::application::services::{OrderLockRegistry, dispatch_fill, publish_events};
use crate::domain::order_lifecycle::{
    CancelReason, MatchDecision, Order, OrderRepository, OrderStatus, StateError,
};
use crate::domain::shared::OrderId;
use crate::error::{CollaboratorError, OrderServiceError};
use crate::observability;

/// Use case for transitions on already-submitted orders.
pub struct TransitionOrderUseCase<O, P, E>
where
    O: OrderRepository,
    P: PositionPort + 'static,
    E: EventPublisherPort,
{
    orders: Arc<O>,
    positions: Arc<P>,
    event_publisher: Arc<E>,
    locks: Arc<OrderLockRegistry>,
}

impl<O, P, E> TransitionOrderUseCase<O, P, E>
where
    O: OrderRepository,
    P: PositionPort + 'static,
    E: EventPublisherPort,
{
    /// Create a new TransitionOrderUseCase.
    pub const fn new(
        orders: Arc<O>,
        positions: Arc<P>,
        event_publisher: Arc<E>,
        locks: Arc<OrderLockRegistry>,
    ) -> Self {
        Self {
            orders,
            positions,
            event_publisher,
            locks,
        }
    }

    /// Apply a decision that arrived after submission returned.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `ConcurrentModification`, `InvalidStateTransition`
    /// or `Persistence`.
    #[tracing::instrument(name = "order.apply_decision", skip_all, fields(order_id = %order_id))]
    pub async fn apply_match_decision(
        &self,
        order_id: &OrderId,
        decision: MatchDecision,
    ) -> Result<Order, OrderServiceError> {
        self.transition(order_id, |order| order.apply_decision(&decision))
            .await
    }

    /// Cancel a `Pending` or `PartiallyFilled` order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `ConcurrentModification`, `InvalidStateTransition`
    /// or `Persistence`.
    #[tracing::instrument(name = "order.cancel", skip_all, fields(order_id = %order_id))]
    pub async fn cancel(
        &self,
        order_id: &OrderId,
        reason: CancelReason,
    ) -> Result<Order, OrderServiceError> {
        self.transition(order_id, |order| {
            order.cancel(reason)?;
            Ok(Decimal::ZERO)
        })
        .await
    }

    async fn transition<F>(&self, order_id: &OrderId, apply: F) -> Result<Order, OrderServiceError>
    where
        F: FnOnce(&mut Order) -> Result<Decimal, StateError>,
    {
        if order_id.is_blank() {
            return Err(OrderServiceError::InvalidArgument { field: "id" });
        }

        let _lock = self.locks.try_acquire(order_id).inspect_err(|e| {
            tracing::warn!(error = %e, "Transition refused");
        })?;

        let mut order = self
            .orders
            .find_by_id(order_id)
            .await
            .map_err(|e| CollaboratorError::Persistence {
                operation: e.operation,
                message: e.message,
                order_id: Some(order_id.clone()),
                left_pending: false,
            })?
            .ok_or_else(|| OrderServiceError::NotFound {
                order_id: order_id.clone(),
            })?;

        let from = order.status();
        let filled = apply(&mut order).inspect_err(|e| {
            tracing::warn!(from = %from, error = %e, "Transition refused");
        })?;

        self.orders
            .save(&order)
            .await
            .map_err(|e| CollaboratorError::Persistence {
                operation: e.operation,
                message: e.message,
                order_id: Some(order_id.clone()),
                left_pending: from == OrderStatus::Pending,
            })?;
        observability::record_order_transition(from.as_str(), order.status().as_str());
        tracing::info!(from = %from, to = %order.status(), "Order transitioned");

        publish_events(self.event_publisher.as_ref(), &mut order).await;
        dispatch_fill(&self.positions, &order, filled);

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{
        RecordingPositions, RecordingPublisher, RecordingRepository, pending_order,
    };
    use crate::error::ErrorCode;
    use rust_decimal_macros::dec;

    struct Harness {
        orders: Arc<RecordingRepository>,
        positions: Arc<RecordingPositions>,
        locks: Arc<OrderLockRegistry>,
        use_case: TransitionOrderUseCase<RecordingRepository, RecordingPositions, RecordingPublisher>,
    }

    impl Harness {
        fn new() -> Self {
            let orders = Arc::new(RecordingRepository::default());
            let positions = Arc::new(RecordingPositions::default());
            let locks = Arc::new(OrderLockRegistry::new());
            let use_case = TransitionOrderUseCase::new(
                Arc::clone(&orders),
                Arc::clone(&positions),
                Arc::new(RecordingPublisher::default()),
                Arc::clone(&locks),
            );
            Self {
                orders,
                positions,
                locks,
                use_case,
            }
        }

        fn seed_pending(&self) -> OrderId {
            let order = pending_order("u1", "2026-01-19T12:00:00Z");
            let id = order.id().clone();
            self.orders.insert(order);
            id
        }
    }

    #[tokio::test]
    async fn late_fill_for_pending_order() {
        let harness = Harness::new();
        let id = harness.seed_pending();

        let order = harness
            .use_case
            .apply_match_decision(&id, MatchDecision::Filled)
            .await
            .unwrap();

        assert_eq!(order.status(), OrderStatus::Filled);
        assert_eq!(
            harness.orders.get(&id).unwrap().status(),
            OrderStatus::Filled
        );
        assert!(order.updated_at() >= order.created_at());
        let notices = harness.positions.wait_for(1).await;
        assert_eq!(notices[0].filled_size, dec!(1));
    }

    #[tokio::test]
    async fn partial_then_cancel_keeps_filled_part() {
        let harness = Harness::new();
        let id = harness.seed_pending();

        harness
            .use_case
            .apply_match_decision(
                &id,
                MatchDecision::PartiallyFilled {
                    remaining: dec!(0.4),
                },
            )
            .await
            .unwrap();
        let order = harness
            .use_case
            .cancel(&id, CancelReason::user_requested())
            .await
            .unwrap();

        assert_eq!(order.status(), OrderStatus::Cancelled);
        assert_eq!(order.remaining_size(), dec!(0.4));
        assert_eq!(order.filled_size(), dec!(0.6));
    }

    #[tokio::test]
    async fn terminal_order_refuses_cancel() {
        let harness = Harness::new();
        let id = harness.seed_pending();
        harness
            .use_case
            .apply_match_decision(&id, MatchDecision::Filled)
            .await
            .unwrap();
        let saves = harness.orders.save_calls();

        let err = harness
            .use_case
            .cancel(&id, CancelReason::user_requested())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            OrderServiceError::State(StateError::InvalidStateTransition {
                from: OrderStatus::Filled,
                to: OrderStatus::Cancelled,
            })
        );
        assert_eq!(harness.orders.save_calls(), saves);
    }

    #[tokio::test]
    async fn unknown_order_is_not_found() {
        let harness = Harness::new();

        let err = harness
            .use_case
            .cancel(&OrderId::new("missing"), CancelReason::user_requested())
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::OrderNotFound);
    }

    #[tokio::test]
    async fn blank_id_is_invalid_argument() {
        let harness = Harness::new();

        let err = harness
            .use_case
            .apply_match_decision(&OrderId::new("  "), MatchDecision::Filled)
            .await
            .unwrap_err();

        assert_eq!(err, OrderServiceError::InvalidArgument { field: "id" });
    }

    #[tokio::test]
    async fn held_lock_fails_fast() {
        let harness = Harness::new();
        let id = harness.seed_pending();
        let _held = harness.locks.try_acquire(&id).unwrap();

        let err = harness
            .use_case
            .apply_match_decision(&id, MatchDecision::Filled)
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ConcurrentModification);
        assert_eq!(
            harness.orders.get(&id).unwrap().status(),
            OrderStatus::Pending
        );
    }

    #[tokio::test]
    async fn save_failure_reports_persistence() {
        let harness = Harness::new();
        let id = harness.seed_pending();
        harness.orders.fail_saves_from(1);

        let err = harness
            .use_case
            .cancel(&id, CancelReason::user_requested())
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::PersistenceUnavailable);
        assert_eq!(
            harness.orders.get(&id).unwrap().status(),
            OrderStatus::Pending
        );
    }
}
