//! Order side (buy or sell).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order. Opens or increases a long position.
    Buy,
    /// Sell order. Opens or increases a short position.
    Sell,
}

impl OrderSide {
    /// Parse the wire value. Only the exact lowercase tokens are accepted.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "buy" => Some(Self::Buy),
            "sell" => Some(Self::Sell),
            _ => None,
        }
    }

    /// The wire token for this side.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_wire_accepts_exact_tokens() {
        assert_eq!(OrderSide::from_wire("buy"), Some(OrderSide::Buy));
        assert_eq!(OrderSide::from_wire("sell"), Some(OrderSide::Sell));
    }

    #[test]
    fn from_wire_rejects_other_casing() {
        assert_eq!(OrderSide::from_wire("BUY"), None);
        assert_eq!(OrderSide::from_wire("Sell"), None);
        assert_eq!(OrderSide::from_wire("hold"), None);
        assert_eq!(OrderSide::from_wire(""), None);
    }

    #[test]
    fn order_side_serde() {
        let json = serde_json::to_string(&OrderSide::Buy).unwrap();
        assert_eq!(json, "\"buy\"");

        let parsed: OrderSide = serde_json::from_str("\"sell\"").unwrap();
        assert_eq!(parsed, OrderSide::Sell);
    }
}
