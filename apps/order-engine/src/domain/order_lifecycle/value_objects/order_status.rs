//! Order status in the lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an order.
///
/// `Pending` is the initial state. `Filled`, `Rejected` and `Cancelled`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Accepted by intake, no decision from matching yet.
    Pending,
    /// Some of the size has been filled.
    PartiallyFilled,
    /// Completely filled.
    Filled,
    /// Refused by the matching authority.
    Rejected,
    /// Cancelled before completion.
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::PartiallyFilled,
        Self::Filled,
        Self::Rejected,
        Self::Cancelled,
    ];

    /// Returns true if the order is in a terminal state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Filled | Self::Rejected | Self::Cancelled)
    }

    /// Returns true if the order can still be cancelled.
    #[must_use]
    pub const fn is_cancelable(&self) -> bool {
        matches!(self, Self::Pending | Self::PartiallyFilled)
    }

    /// The wire token for this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::PartiallyFilled => "partially_filled",
            Self::Filled => "filled",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
