//! Dependency Injection Container
//!
//! Manages creation and wiring of all application components.

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{
    EventPublisherPort, MarketRegistryPort, MatchingPort, PositionPort, RiskCheckPort,
};
use crate::application::services::OrderLockRegistry;
use crate::application::use_cases::{OrderDirectory, SubmitOrderUseCase, TransitionOrderUseCase};
use crate::domain::order_lifecycle::OrderRepository;
use crate::infrastructure::http::AppState;

/// Dependency injection container.
///
/// Every use case built from one container shares the same
/// [`OrderLockRegistry`], so submissions and later transitions on an order
/// are serialized against each other.
pub struct Container<O, M, K, R, P, E>
where
    O: OrderRepository + 'static,
    M: MatchingPort + 'static,
    K: MarketRegistryPort + 'static,
    R: RiskCheckPort + 'static,
    P: PositionPort + 'static,
    E: EventPublisherPort + 'static,
{
    // Ports
    orders: Arc<O>,
    matching: Arc<M>,
    markets: Arc<K>,
    risk: Arc<R>,
    positions: Arc<P>,
    event_publisher: Arc<E>,

    locks: Arc<OrderLockRegistry>,
    matching_timeout: Duration,
    lookup_timeout: Duration,
}

impl<O, M, K, R, P, E> Container<O, M, K, R, P, E>
where
    O: OrderRepository + 'static,
    M: MatchingPort + 'static,
    K: MarketRegistryPort + 'static,
    R: RiskCheckPort + 'static,
    P: PositionPort + 'static,
    E: EventPublisherPort + 'static,
{
    /// Create a new container with all dependencies.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        orders: Arc<O>,
        matching: Arc<M>,
        markets: Arc<K>,
        risk: Arc<R>,
        positions: Arc<P>,
        event_publisher: Arc<E>,
        matching_timeout: Duration,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            orders,
            matching,
            markets,
            risk,
            positions,
            event_publisher,
            locks: Arc::new(OrderLockRegistry::new()),
            matching_timeout,
            lookup_timeout,
        }
    }

    /// Get the order repository.
    pub fn order_repo(&self) -> Arc<O> {
        Arc::clone(&self.orders)
    }

    /// Get the shared lock registry.
    pub fn locks(&self) -> Arc<OrderLockRegistry> {
        Arc::clone(&self.locks)
    }

    /// Create a `SubmitOrderUseCase`.
    pub fn submit_order_use_case(&self) -> SubmitOrderUseCase<O, M, K, R, P, E> {
        SubmitOrderUseCase::new(
            Arc::clone(&self.orders),
            Arc::clone(&self.matching),
            Arc::clone(&self.markets),
            Arc::clone(&self.risk),
            Arc::clone(&self.positions),
            Arc::clone(&self.event_publisher),
            Arc::clone(&self.locks),
            self.matching_timeout,
        )
    }

    /// Create a `TransitionOrderUseCase`.
    pub fn transition_order_use_case(&self) -> TransitionOrderUseCase<O, P, E> {
        TransitionOrderUseCase::new(
            Arc::clone(&self.orders),
            Arc::clone(&self.positions),
            Arc::clone(&self.event_publisher),
            Arc::clone(&self.locks),
        )
    }

    /// Create an `OrderDirectory`.
    pub fn order_directory(&self) -> OrderDirectory<O> {
        OrderDirectory::new(Arc::clone(&self.orders), self.lookup_timeout)
    }

    /// Build the HTTP state from this container's use cases.
    pub fn app_state(&self, version: impl Into<String>) -> AppState<O, M, K, R, P, E> {
        AppState {
            submit: Arc::new(self.submit_order_use_case()),
            transition: Arc::new(self.transition_order_use_case()),
            directory: Arc::new(self.order_directory()),
            order_repo: self.order_repo(),
            version: version.into(),
        }
    }
}
