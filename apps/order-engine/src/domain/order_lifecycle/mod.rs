//! Order Lifecycle Bounded Context
//!
//! Validation, the order aggregate and its status state machine.
//!
//! # Lifecycle
//!
//! ```text
//! Pending ──► Filled
//!    │  └───► Rejected
//!    │  └───► Cancelled
//!    ▼
//! PartiallyFilled ──► PartiallyFilled (smaller remaining)
//!          └───► Filled
//!          └───► Cancelled
//! ```

pub mod aggregate;
pub mod errors;
pub mod events;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use aggregate::{CreateOrderCommand, Order};
pub use errors::{StateError, ValidationError};
pub use events::OrderEvent;
pub use repository::{OrderRepository, PersistenceError};
pub use services::{CheckedDraft, OrderDraft, OrderStateMachine, OrderValidator};
pub use value_objects::{
    CancelReason, MatchDecision, OrderKind, OrderSide, OrderStatus, RejectReason,
};
