//! Domain events for the order lifecycle.
//!
//! Accumulated on the aggregate and drained by the lifecycle use cases
//! for publication.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::value_objects::{CancelReason, OrderKind, OrderSide, RejectReason};
use crate::domain::shared::{AccountId, OrderId, Symbol, Timestamp};

/// All possible order events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEvent {
    /// Order accepted by intake.
    Submitted(OrderSubmitted),
    /// Order partially filled.
    PartiallyFilled(OrderPartiallyFilled),
    /// Order completely filled.
    Filled(OrderFilled),
    /// Order rejected by matching.
    Rejected(OrderRejected),
    /// Order cancelled.
    Cancelled(OrderCancelled),
}

impl OrderEvent {
    /// Get the order ID for this event.
    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        match self {
            Self::Submitted(e) => &e.order_id,
            Self::PartiallyFilled(e) => &e.order_id,
            Self::Filled(e) => &e.order_id,
            Self::Rejected(e) => &e.order_id,
            Self::Cancelled(e) => &e.order_id,
        }
    }

    /// Get the timestamp when this event occurred.
    #[must_use]
    pub const fn occurred_at(&self) -> Timestamp {
        match self {
            Self::Submitted(e) => e.occurred_at,
            Self::PartiallyFilled(e) => e.occurred_at,
            Self::Filled(e) => e.occurred_at,
            Self::Rejected(e) => e.occurred_at,
            Self::Cancelled(e) => e.occurred_at,
        }
    }

    /// Get the event type name.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::Submitted(_) => "ORDER_SUBMITTED",
            Self::PartiallyFilled(_) => "ORDER_PARTIALLY_FILLED",
            Self::Filled(_) => "ORDER_FILLED",
            Self::Rejected(_) => "ORDER_REJECTED",
            Self::Cancelled(_) => "ORDER_CANCELLED",
        }
    }
}

/// Event: Order accepted by intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSubmitted {
    /// Order ID.
    pub order_id: OrderId,
    /// Owning account.
    pub account_id: AccountId,
    /// Symbol.
    pub symbol: Symbol,
    /// Side.
    pub side: OrderSide,
    /// Kind.
    pub kind: OrderKind,
    /// Size.
    pub size: Decimal,
    /// Recorded price.
    pub price: Decimal,
    /// Leverage.
    pub leverage: u32,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}

/// Event: Order partially filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPartiallyFilled {
    /// Order ID.
    pub order_id: OrderId,
    /// Size filled by this decision.
    pub filled: Decimal,
    /// Size still open.
    pub remaining: Decimal,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}

/// Event: Order completely filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFilled {
    /// Order ID.
    pub order_id: OrderId,
    /// Size filled by this decision.
    pub filled: Decimal,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}

/// Event: Order rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRejected {
    /// Order ID.
    pub order_id: OrderId,
    /// Rejection reason.
    pub reason: RejectReason,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}

/// Event: Order cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancelled {
    /// Order ID.
    pub order_id: OrderId,
    /// Cancellation reason.
    pub reason: CancelReason,
    /// Size left unfilled.
    pub remaining: Decimal,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}
