//! Order Repository Trait
//!
//! Defines the persistence abstraction for orders.
//! Implemented by adapters in the infrastructure layer.

use async_trait::async_trait;
use thiserror::Error;

use super::aggregate::Order;
use crate::domain::shared::{AccountId, OrderId};

/// Failure reported by a persistence adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("persistence {operation} failed: {message}")]
pub struct PersistenceError {
    /// Which repository operation failed (`save`, `find_by_id`, ...).
    pub operation: &'static str,
    /// Adapter-specific detail.
    pub message: String,
}

impl PersistenceError {
    /// Create a new persistence error.
    #[must_use]
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

/// Repository trait for Order persistence.
///
/// Each operation must be atomic with respect to concurrent saves of the
/// same order id. Orders are never deleted.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Save an order (insert or replace by id).
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails.
    async fn save(&self, order: &Order) -> Result<(), PersistenceError>;

    /// Find an order by its id.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails. A missing order is `Ok(None)`.
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, PersistenceError>;

    /// Find every order owned by an account, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_account(&self, account_id: &AccountId)
    -> Result<Vec<Order>, PersistenceError>;

    /// Cheap reachability probe for health checks.
    ///
    /// # Errors
    ///
    /// Returns error if the store is unreachable.
    async fn ping(&self) -> Result<(), PersistenceError>;
}
