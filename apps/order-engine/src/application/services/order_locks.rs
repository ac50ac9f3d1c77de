//! Per-order serialization of lifecycle transitions.
//!
//! Two transitions on the same order never interleave. A second attempt
//! fails fast instead of queueing, so the caller learns about the race.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::order_lifecycle::StateError;
use crate::domain::shared::OrderId;

type LockTable = Mutex<HashMap<OrderId, Arc<AsyncMutex<()>>>>;

/// Registry of per-order async locks.
#[derive(Debug, Default)]
pub struct OrderLockRegistry {
    locks: Arc<LockTable>,
}

impl OrderLockRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the lock for `order_id` without waiting.
    ///
    /// # Errors
    ///
    /// Returns `ConcurrentModification` if the lock is already held.
    pub fn try_acquire(&self, order_id: &OrderId) -> Result<OrderLockGuard, StateError> {
        let lock = {
            let mut table = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(table.entry(order_id.clone()).or_default())
        };

        let guard = lock
            .try_lock_owned()
            .map_err(|_| StateError::ConcurrentModification {
                order_id: order_id.clone(),
            })?;

        Ok(OrderLockGuard {
            order_id: order_id.clone(),
            table: Arc::clone(&self.locks),
            guard: Some(guard),
        })
    }

    /// Number of orders with a live lock entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True when no order is locked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Held while a transition is in progress. Releases on drop.
#[derive(Debug)]
pub struct OrderLockGuard {
    order_id: OrderId,
    table: Arc<LockTable>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl OrderLockGuard {
    /// The locked order.
    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        &self.order_id
    }
}

impl Drop for OrderLockGuard {
    fn drop(&mut self) {
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        drop(self.guard.take());
        // Only the table still references the mutex: nobody is waiting on it.
        if table
            .get(&self.order_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            table.remove(&self.order_id);
        }
    }
}
