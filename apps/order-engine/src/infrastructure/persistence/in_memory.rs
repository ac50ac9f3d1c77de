//! In-memory order repository.

use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::order_lifecycle::{Order, OrderRepository, PersistenceError};
use crate::domain::shared::{AccountId, OrderId};

#[derive(Debug, Default)]
struct Tables {
    orders: HashMap<OrderId, Order>,
    by_account: HashMap<AccountId, HashSet<OrderId>>,
}

/// In-memory implementation of `OrderRepository`.
///
/// Both tables sit behind one lock, so a save is atomic with respect to
/// concurrent saves and reads. Not durable.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    tables: RwLock<Tables>,
}

impl InMemoryOrderRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-loaded with `orders`.
    #[must_use]
    pub fn with_orders(orders: impl IntoIterator<Item = Order>) -> Self {
        let repo = Self::new();
        if let Ok(mut tables) = repo.tables.write() {
            for order in orders {
                insert(&mut tables, order);
            }
        }
        repo
    }

    /// Get the number of orders in the repository.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read("len").map_or(0, |t| t.orders.len())
    }

    /// Check if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self, operation: &'static str) -> Result<RwLockReadGuard<'_, Tables>, PersistenceError> {
        self.tables
            .read()
            .map_err(|_| PersistenceError::new(operation, "order table lock poisoned"))
    }

    fn write(
        &self,
        operation: &'static str,
    ) -> Result<RwLockWriteGuard<'_, Tables>, PersistenceError> {
        self.tables
            .write()
            .map_err(|_| PersistenceError::new(operation, "order table lock poisoned"))
    }
}

fn insert(tables: &mut Tables, order: Order) {
    tables
        .by_account
        .entry(order.account_id().clone())
        .or_default()
        .insert(order.id().clone());
    tables.orders.insert(order.id().clone(), order);
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), PersistenceError> {
        let mut tables = self.write("save")?;
        let mut stored = order.clone();
        stored.drain_events();
        insert(&mut tables, stored);
        Ok(())
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, PersistenceError> {
        let tables = self.read("find_by_id")?;
        Ok(tables.orders.get(id).cloned())
    }

    async fn find_by_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<Order>, PersistenceError> {
        let tables = self.read("find_by_account")?;
        let Some(ids) = tables.by_account.get(account_id) else {
            return Ok(Vec::new());
        };
        Ok(ids
            .iter()
            .filter_map(|id| tables.orders.get(id))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), PersistenceError> {
        self.read("ping").map(|_| ())
    }
}
