// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::option_if_let_else,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! Order Engine - Rust Core Library
//!
//! Order intake and lifecycle service for a leveraged perpetuals venue.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic (aggregates, value objects, domain events)
//!   - `order_lifecycle`: Order aggregate, status state machine, validation
//!   - `market`: Market snapshots, positions and fill notices
//!   - `account`: Account balances read by the risk check
//!   - `shared`: Identifiers, symbols, timestamps
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: Interfaces for collaborators (`MatchingPort`, `MarketRegistryPort`,
//!     `RiskCheckPort`, `PositionPort`, `EventPublisherPort`)
//!   - `use_cases`: `SubmitOrder`, `TransitionOrder`, `OrderDirectory`
//!   - `services`: Per-order locking and lifecycle side effects
//!   - `dto`: Data transfer objects for API boundaries
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `persistence`: Order repository (in-memory)
//!   - `matching`, `market`, `risk`, `positions`: Collaborator adapters
//!   - `http`: Axum REST API
//!   - `config`: Dependency injection container

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// Configuration loading.
pub mod config;

/// Error taxonomy and HTTP status mapping.
pub mod error;

/// Prometheus metrics.
pub mod observability;

/// Tracing subscriber setup.
pub mod telemetry;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::order_lifecycle::{
    MatchDecision, Order, OrderDraft, OrderKind, OrderSide, OrderStatus, OrderStateMachine,
};
pub use domain::shared::{AccountId, OrderId, Symbol, Timestamp};

// Application re-exports
pub use application::dto::OrderDto;
pub use application::ports::{
    EventPublisherPort, MarketRegistryPort, MatchingPort, NoOpEventPublisher, PositionPort,
    RiskCheckPort,
};
pub use application::use_cases::{OrderDirectory, SubmitOrderUseCase, TransitionOrderUseCase};

// Infrastructure re-exports
pub use infrastructure::config::Container;
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::persistence::InMemoryOrderRepository;

pub use error::{ErrorCode, OrderServiceError};
