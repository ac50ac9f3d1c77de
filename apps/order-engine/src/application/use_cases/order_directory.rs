//! Order Directory
//!
//! Read-only lookups by order id and by account. Bypasses validation and
//! the lifecycle entirely.

use std::cmp::Reverse;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::domain::order_lifecycle::{Order, OrderRepository, PersistenceError};
use crate::domain::shared::{AccountId, OrderId};
use crate::error::{CollaboratorError, OrderServiceError};
use crate::observability;

/// Lookup service over the order repository.
pub struct OrderDirectory<O>
where
    O: OrderRepository,
{
    orders: Arc<O>,
    lookup_timeout: Duration,
}

impl<O> OrderDirectory<O>
where
    O: OrderRepository,
{
    /// Create a new OrderDirectory.
    pub const fn new(orders: Arc<O>, lookup_timeout: Duration) -> Self {
        Self {
            orders,
            lookup_timeout,
        }
    }

    /// Fetch one order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a blank id, `NotFound` if no order has
    /// this id, or `Persistence` if the store failed or timed out.
    pub async fn get_by_id(&self, order_id: &str) -> Result<Order, OrderServiceError> {
        self.get_by_id_with_cancel(order_id, &CancellationToken::new())
            .await
    }

    /// Like [`Self::get_by_id`], abandoning the lookup when `cancel` fires.
    ///
    /// # Errors
    ///
    /// See [`Self::get_by_id`]; also `Cancelled`.
    #[tracing::instrument(name = "order.get_by_id", skip_all, fields(order_id = %order_id))]
    pub async fn get_by_id_with_cancel(
        &self,
        order_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Order, OrderServiceError> {
        let order_id = order_id.trim();
        if order_id.is_empty() {
            return Err(OrderServiceError::InvalidArgument { field: "id" });
        }
        let order_id = OrderId::new(order_id);

        let result = self
            .bounded("find_by_id", cancel, self.orders.find_by_id(&order_id))
            .await
            .and_then(|found| {
                found.ok_or_else(|| OrderServiceError::NotFound {
                    order_id: order_id.clone(),
                })
            });

        let outcome = match &result {
            Ok(_) => "found",
            Err(OrderServiceError::NotFound { .. }) => "not_found",
            Err(e) => e.code().reason(),
        };
        observability::record_order_lookup("id", outcome);

        result
    }

    /// Every order owned by `account_id`, newest first.
    ///
    /// Ties on `created_at` are broken by id, descending. An account with
    /// no orders yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a blank account id, or `Persistence`
    /// if the store failed or timed out.
    pub async fn get_by_account(&self, account_id: &str) -> Result<Vec<Order>, OrderServiceError> {
        self.get_by_account_with_cancel(account_id, &CancellationToken::new())
            .await
    }

    /// Like [`Self::get_by_account`], abandoning the lookup when `cancel` fires.
    ///
    /// # Errors
    ///
    /// See [`Self::get_by_account`]; also `Cancelled`.
    #[tracing::instrument(name = "order.get_by_account", skip_all, fields(account_id = %account_id))]
    pub async fn get_by_account_with_cancel(
        &self,
        account_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Order>, OrderServiceError> {
        let account_id = account_id.trim();
        if account_id.is_empty() {
            return Err(OrderServiceError::InvalidArgument { field: "userId" });
        }
        let account_id = AccountId::new(account_id);

        let result = self
            .bounded(
                "find_by_account",
                cancel,
                self.orders.find_by_account(&account_id),
            )
            .await
            .map(|mut orders| {
                orders.sort_by_key(|o| Reverse((o.created_at(), o.id().clone())));
                orders
            });

        let outcome = match &result {
            Ok(_) => "found",
            Err(e) => e.code().reason(),
        };
        observability::record_order_lookup("account", outcome);

        result
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        cancel: &CancellationToken,
        query: impl Future<Output = Result<T, PersistenceError>>,
    ) -> Result<T, OrderServiceError> {
        let answer = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                return Err(OrderServiceError::Cancelled {
                    order_id: None,
                    left_pending: false,
                });
            }
            answer = tokio::time::timeout(self.lookup_timeout, query) => answer,
        };

        let persistence = |message: String| CollaboratorError::Persistence {
            operation,
            message,
            order_id: None,
            left_pending: false,
        };

        match answer {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(persistence(e.message).into()),
            Err(_elapsed) => Err(persistence(format!(
                "timed out after {}ms",
                self.lookup_timeout.as_millis()
            ))
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::OrderDto;
    use crate::application::testing::{RecordingRepository, pending_order};
    use crate::error::ErrorCode;
    use test_case::test_case;

    fn directory(orders: &Arc<RecordingRepository>) -> OrderDirectory<RecordingRepository> {
        OrderDirectory::new(Arc::clone(orders), Duration::from_millis(100))
    }

    #[tokio::test]
    async fn get_by_id_returns_stored_order() {
        let orders = Arc::new(RecordingRepository::default());
        let order = pending_order("u1", "2026-01-19T12:00:00Z");
        let id = order.id().clone();
        orders.insert(order);

        let found = directory(&orders).get_by_id(id.as_str()).await.unwrap();
        assert_eq!(found.id(), &id);
    }

    #[tokio::test]
    async fn repeated_get_by_id_returns_equal_records() {
        let orders = Arc::new(RecordingRepository::default());
        let order = pending_order("u1", "2026-01-19T12:00:00Z");
        let id = order.id().clone();
        orders.insert(order);
        let directory = directory(&orders);

        let first = directory.get_by_id(id.as_str()).await.unwrap();
        let second = directory.get_by_id(id.as_str()).await.unwrap();

        assert_eq!(OrderDto::from_order(&first), OrderDto::from_order(&second));
        assert_eq!(first.updated_at(), second.updated_at());
        assert_eq!(orders.find_calls(), 2);
        assert_eq!(orders.save_calls(), 0);
    }

    #[tokio::test]
    async fn get_by_id_unknown_is_not_found() {
        let orders = Arc::new(RecordingRepository::default());

        let err = directory(&orders).get_by_id("missing").await.unwrap_err();
        assert_eq!(
            err,
            OrderServiceError::NotFound {
                order_id: OrderId::new("missing")
            }
        );
    }

    #[test_case("" ; "empty")]
    #[test_case("   " ; "whitespace")]
    #[tokio::test]
    async fn blank_arguments_do_not_touch_persistence(arg: &str) {
        let orders = Arc::new(RecordingRepository::default());
        let directory = directory(&orders);

        let err = directory.get_by_id(arg).await.unwrap_err();
        assert_eq!(err, OrderServiceError::InvalidArgument { field: "id" });

        let err = directory.get_by_account(arg).await.unwrap_err();
        assert_eq!(err, OrderServiceError::InvalidArgument { field: "userId" });

        assert_eq!(orders.find_calls(), 0);
    }

    #[tokio::test]
    async fn get_by_account_newest_first_with_id_tiebreak() {
        let orders = Arc::new(RecordingRepository::default());
        let oldest = pending_order("u1", "2026-01-19T10:00:00Z");
        let tie_a = pending_order("u1", "2026-01-19T12:00:00Z");
        let tie_b = pending_order("u1", "2026-01-19T12:00:00Z");
        let other = pending_order("u2", "2026-01-19T13:00:00Z");

        let (hi, lo) = if tie_a.id() > tie_b.id() {
            (tie_a.id().clone(), tie_b.id().clone())
        } else {
            (tie_b.id().clone(), tie_a.id().clone())
        };
        let oldest_id = oldest.id().clone();
        for order in [oldest, tie_a, tie_b, other] {
            orders.insert(order);
        }

        let listed = directory(&orders).get_by_account("u1").await.unwrap();
        let ids: Vec<_> = listed.iter().map(|o| o.id().clone()).collect();

        assert_eq!(ids, vec![hi, lo, oldest_id]);
    }

    #[tokio::test]
    async fn unknown_account_is_empty() {
        let orders = Arc::new(RecordingRepository::default());
        let listed = directory(&orders).get_by_account("nobody").await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn store_failure_is_persistence_error() {
        let orders = Arc::new(RecordingRepository::default());
        orders.fail_finds();

        let err = directory(&orders).get_by_id("ord-1").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::PersistenceUnavailable);

        let err = directory(&orders).get_by_account("u1").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::PersistenceUnavailable);
    }

    #[tokio::test]
    async fn cancelled_lookup() {
        let orders = Arc::new(RecordingRepository::default());
        let token = CancellationToken::new();
        token.cancel();

        let err = directory(&orders)
            .get_by_id_with_cancel("ord-1", &token)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Cancelled);
    }
}
