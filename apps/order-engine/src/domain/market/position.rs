//! Positions and the fill notices that feed them.
//!
//! Position state is owned by the position collaborator. The order
//! lifecycle only emits [`FillNotice`] values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order_lifecycle::{Order, OrderSide};
use crate::domain::shared::{AccountId, OrderId, PositionId, Symbol, Timestamp};

/// Direction of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    /// Profits when price rises.
    Long,
    /// Profits when price falls.
    Short,
}

impl PositionSide {
    /// Buy orders build longs, sell orders build shorts.
    #[must_use]
    pub const fn from_order_side(side: OrderSide) -> Self {
        match side {
            OrderSide::Buy => Self::Long,
            OrderSide::Sell => Self::Short,
        }
    }
}

/// A leveraged position held by an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Position identifier.
    pub id: PositionId,
    /// Owning account.
    pub account_id: AccountId,
    /// Market symbol.
    pub symbol: Symbol,
    /// Direction.
    pub side: PositionSide,
    /// Open size.
    pub size: Decimal,
    /// Average entry price.
    pub entry_price: Decimal,
    /// Leverage multiplier.
    pub leverage: u32,
    /// Liquidation price, once computed by the risk engine.
    pub liquidation_price: Option<Decimal>,
    /// Unrealized profit and loss at the last mark.
    pub unrealized_pnl: Decimal,
    /// Opened at.
    pub created_at: Timestamp,
    /// Last changed at.
    pub updated_at: Timestamp,
}

impl Position {
    /// A fresh position opened by a single fill.
    #[must_use]
    pub fn opened_by(notice: &FillNotice) -> Self {
        Self {
            id: PositionId::generate(),
            account_id: notice.account_id.clone(),
            symbol: notice.symbol.clone(),
            side: notice.position_side,
            size: notice.filled_size,
            entry_price: notice.price,
            leverage: notice.leverage,
            liquidation_price: None,
            unrealized_pnl: Decimal::ZERO,
            created_at: notice.occurred_at,
            updated_at: notice.occurred_at,
        }
    }
}

/// Handed to the position collaborator after a fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillNotice {
    /// Order that filled.
    pub order_id: OrderId,
    /// Owning account.
    pub account_id: AccountId,
    /// Market symbol.
    pub symbol: Symbol,
    /// Direction of the resulting exposure.
    pub position_side: PositionSide,
    /// Size filled by this decision only.
    pub filled_size: Decimal,
    /// Order price.
    pub price: Decimal,
    /// Order leverage.
    pub leverage: u32,
    /// When the fill was applied.
    pub occurred_at: Timestamp,
}

impl FillNotice {
    /// Build a notice for `filled_size` of `order`.
    #[must_use]
    pub fn for_order(order: &Order, filled_size: Decimal) -> Self {
        Self {
            order_id: order.id().clone(),
            account_id: order.account_id().clone(),
            symbol: order.symbol().clone(),
            position_side: PositionSide::from_order_side(order.side()),
            filled_size,
            price: order.price(),
            leverage: order.leverage(),
            occurred_at: order.updated_at(),
        }
    }
}
