//! Reasons for order rejection and cancellation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why the matching authority refused an order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RejectReason {
    /// Machine-readable rejection code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl RejectReason {
    /// Create a new reject reason.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// No resting liquidity could take the order.
    #[must_use]
    pub fn no_liquidity() -> Self {
        Self::new("NO_LIQUIDITY", "No liquidity available for order")
    }

    /// Price outside the band the matching engine accepts.
    #[must_use]
    pub fn price_out_of_band(detail: &str) -> Self {
        Self::new("PRICE_OUT_OF_BAND", format!("Price out of band: {detail}"))
    }

    /// Market halted for the symbol.
    #[must_use]
    pub fn market_halted(symbol: &str) -> Self {
        Self::new("MARKET_HALTED", format!("Market halted: {symbol}"))
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Why an order was cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CancelReason {
    /// Cancellation code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl CancelReason {
    /// Create a new cancel reason.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Cancelled at the account holder's request.
    #[must_use]
    pub fn user_requested() -> Self {
        Self::new("USER_REQUESTED", "Cancelled by user request")
    }

    /// Cancelled by the venue (risk, maintenance).
    #[must_use]
    pub fn venue(message: impl Into<String>) -> Self {
        Self::new("VENUE", message)
    }
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_reason_display() {
        let reason = RejectReason::no_liquidity();
        assert_eq!(
            reason.to_string(),
            "[NO_LIQUIDITY] No liquidity available for order"
        );
    }

    #[test]
    fn reject_reason_with_detail() {
        let reason = RejectReason::market_halted("BTC-PERP");
        assert_eq!(reason.code, "MARKET_HALTED");
        assert!(reason.message.contains("BTC-PERP"));
    }

    #[test]
    fn cancel_reason_constructors() {
        assert_eq!(CancelReason::user_requested().code, "USER_REQUESTED");
        let venue = CancelReason::venue("maintenance window");
        assert_eq!(venue.code, "VENUE");
        assert_eq!(venue.message, "maintenance window");
    }
}
