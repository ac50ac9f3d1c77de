//! Order kind (market or limit).

use serde::{Deserialize, Serialize};
use std::fmt;

/// How an order is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    /// Execute at the prevailing price; stamped with the mark price on intake.
    Market,
    /// Execute at the supplied limit price or better.
    Limit,
}

impl OrderKind {
    /// Parse the wire value. Only the exact lowercase tokens are accepted.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "market" => Some(Self::Market),
            "limit" => Some(Self::Limit),
            _ => None,
        }
    }

    /// Returns true if the caller must supply a price.
    #[must_use]
    pub const fn requires_price(&self) -> bool {
        matches!(self, Self::Limit)
    }

    /// The wire token for this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Limit => "limit",
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
