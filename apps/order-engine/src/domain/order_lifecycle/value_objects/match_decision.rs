//! Decisions returned by the matching authority.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{OrderStatus, RejectReason};

/// Outcome of submitting an order for matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MatchDecision {
    /// The whole remaining size was filled.
    Filled,
    /// Part of the size was filled; `remaining` is still open.
    PartiallyFilled {
        /// Size left unfilled after this decision.
        remaining: Decimal,
    },
    /// The order was refused.
    Rejected {
        /// Why it was refused.
        reason: RejectReason,
    },
}

impl MatchDecision {
    /// The status this decision moves an order to.
    #[must_use]
    pub const fn target_status(&self) -> OrderStatus {
        match self {
            Self::Filled => OrderStatus::Filled,
            Self::PartiallyFilled { .. } => OrderStatus::PartiallyFilled,
            Self::Rejected { .. } => OrderStatus::Rejected,
        }
    }
}
