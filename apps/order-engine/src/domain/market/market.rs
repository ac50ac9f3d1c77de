//! Market snapshot as published by the market registry.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::Symbol;

/// A perpetual market. Read-only for the order lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    /// Market symbol, e.g. `BTC-PERP`.
    pub symbol: Symbol,
    /// Base asset, e.g. `BTC`.
    pub base_asset: String,
    /// Quote asset, e.g. `USD`.
    pub quote_asset: String,
    /// Index (spot reference) price.
    pub index_price: Decimal,
    /// Mark price used to stamp market orders.
    pub mark_price: Decimal,
    /// Current funding rate.
    #[serde(default)]
    pub funding_rate: Decimal,
    /// Traded volume over the last 24 hours.
    #[serde(default)]
    pub volume_24h: Decimal,
    /// Open interest.
    #[serde(default)]
    pub open_interest: Decimal,
}
