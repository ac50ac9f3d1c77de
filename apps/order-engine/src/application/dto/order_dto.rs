//! Order DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order_lifecycle::{
    CancelReason, Order, OrderKind, OrderSide, OrderStatus, RejectReason,
};
use crate::domain::shared::Timestamp;

/// Transport representation of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    /// Order ID.
    pub id: String,
    /// Owning account.
    pub user_id: String,
    /// Symbol.
    pub symbol: String,
    /// Side.
    pub side: OrderSide,
    /// Size.
    #[serde(with = "rust_decimal::serde::float")]
    pub size: Decimal,
    /// Recorded price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Leverage.
    pub leverage: u32,
    /// Kind.
    #[serde(rename = "type")]
    pub kind: OrderKind,
    /// Status.
    pub status: OrderStatus,
    /// Size not yet filled.
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining_size: Decimal,
    /// Rejection reason, when rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<RejectReason>,
    /// Cancellation reason, when cancelled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<CancelReason>,
    /// Created at.
    pub created_at: Timestamp,
    /// Updated at.
    pub updated_at: Timestamp,
}

impl OrderDto {
    /// Create from domain Order.
    #[must_use]
    pub fn from_order(order: &Order) -> Self {
        Self {
            id: order.id().to_string(),
            user_id: order.account_id().to_string(),
            symbol: order.symbol().to_string(),
            side: order.side(),
            size: order.size(),
            price: order.price(),
            leverage: order.leverage(),
            kind: order.kind(),
            status: order.status(),
            remaining_size: order.remaining_size(),
            reject_reason: order.reject_reason().cloned(),
            cancel_reason: order.cancel_reason().cloned(),
            created_at: order.created_at(),
            updated_at: order.updated_at(),
        }
    }
}

impl From<&Order> for OrderDto {
    fn from(order: &Order) -> Self {
        Self::from_order(order)
    }
}
