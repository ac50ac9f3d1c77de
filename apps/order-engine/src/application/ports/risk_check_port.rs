//! Risk Check Port (Driven Port)
//!
//! Leverage caps and margin approval. The margin formula lives entirely
//! behind this port.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order_lifecycle::{OrderKind, OrderSide};
use crate::domain::shared::{AccountId, Symbol};

/// Everything the risk collaborator needs to approve margin for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginRequest {
    /// Owning account.
    pub account_id: AccountId,
    /// Market symbol.
    pub symbol: Symbol,
    /// Side.
    pub side: OrderSide,
    /// Kind.
    pub kind: OrderKind,
    /// Size.
    pub size: Decimal,
    /// Recorded price (limit or mark).
    pub price: Decimal,
    /// Size times price.
    pub notional: Decimal,
    /// Leverage, already within the market cap.
    pub leverage: u32,
}

/// Outcome of a margin check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarginDecision {
    /// Margin is available.
    Approved,
    /// Margin is not available.
    Denied {
        /// Why.
        reason: String,
    },
}

/// Risk collaborator errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RiskCheckError {
    /// The risk service could not be reached.
    #[error("risk service unreachable: {message}")]
    Unreachable {
        /// Transport detail.
        message: String,
    },
}

/// Port for leverage and margin checks.
#[async_trait]
pub trait RiskCheckPort: Send + Sync {
    /// Maximum leverage allowed on `symbol`.
    ///
    /// # Errors
    ///
    /// Returns error if the limit cannot be read.
    async fn max_leverage(&self, symbol: &Symbol) -> Result<u32, RiskCheckError>;

    /// Approve or deny margin for an order.
    ///
    /// # Errors
    ///
    /// Returns error if the check cannot be performed.
    async fn check_margin(&self, request: &MarginRequest) -> Result<MarginDecision, RiskCheckError>;
}
