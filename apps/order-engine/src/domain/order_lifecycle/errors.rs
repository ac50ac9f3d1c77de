//! Order lifecycle errors.

use rust_decimal::Decimal;
use thiserror::Error;

use super::value_objects::OrderStatus;
use crate::domain::shared::OrderId;

/// A submission that failed intake checks.
///
/// Always raised before anything is persisted or sent to matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field was empty after trimming.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Wire name of the field.
        field: &'static str,
    },

    /// Side was not exactly `buy` or `sell`.
    #[error("invalid side '{value}': expected 'buy' or 'sell'")]
    InvalidSide {
        /// The supplied value.
        value: String,
    },

    /// Kind was not exactly `market` or `limit`.
    #[error("invalid order type '{value}': expected 'market' or 'limit'")]
    InvalidKind {
        /// The supplied value.
        value: String,
    },

    /// Size was zero, negative or not a finite number.
    ///
    /// Sizes are held as `Decimal`, so a positive value smaller than the
    /// finest decimal step (about 1e-28) rounds to zero and lands here too.
    #[error("invalid size {value}: must be a finite number greater than zero")]
    InvalidSize {
        /// The supplied value, as text.
        value: String,
    },

    /// A limit order without a usable price.
    #[error("limit orders require a finite price greater than zero")]
    MissingPrice,

    /// Size times price does not fit in a `Decimal`.
    #[error("notional of size {size} at price {price} is out of range")]
    NotionalOverflow {
        /// The accepted size.
        size: String,
        /// The price the order would be recorded at.
        price: String,
    },

    /// Leverage below one or above the market cap.
    #[error("invalid leverage {leverage}: {detail}")]
    InvalidLeverage {
        /// The supplied leverage.
        leverage: i64,
        /// What bound was violated.
        detail: String,
    },

    /// No market is listed for the symbol.
    #[error("unknown symbol: {symbol}")]
    UnknownSymbol {
        /// The normalized symbol.
        symbol: String,
    },

    /// The risk collaborator refused the margin for this order.
    #[error("insufficient margin: {reason}")]
    InsufficientMargin {
        /// Reason given by the risk collaborator.
        reason: String,
    },
}

impl ValidationError {
    /// Leverage below the floor of one.
    #[must_use]
    pub fn leverage_below_one(leverage: i64) -> Self {
        Self::InvalidLeverage {
            leverage,
            detail: "must be at least 1".to_string(),
        }
    }

    /// Leverage above the market cap.
    #[must_use]
    pub fn leverage_above_cap(leverage: i64, max: u32) -> Self {
        Self::InvalidLeverage {
            leverage,
            detail: format!("exceeds maximum of {max}"),
        }
    }
}

/// A lifecycle transition that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// The state machine does not allow `from -> to`.
    #[error("invalid order state transition: {from} -> {to}")]
    InvalidStateTransition {
        /// Current status.
        from: OrderStatus,
        /// Requested status.
        to: OrderStatus,
    },

    /// Another transition on the same order is in flight.
    #[error("order {order_id} is being modified concurrently")]
    ConcurrentModification {
        /// The contested order.
        order_id: OrderId,
    },

    /// A partial fill whose remaining size does not shrink the open size.
    #[error("invalid remaining size {remaining}: must be above zero and below {open}")]
    InvalidRemaining {
        /// Remaining size reported by matching.
        remaining: Decimal,
        /// Size open before the decision.
        open: Decimal,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_display() {
        let err = ValidationError::EmptyField { field: "userId" };
        assert_eq!(err.to_string(), "userId must not be empty");
    }

    #[test]
    fn leverage_helpers() {
        let below = ValidationError::leverage_below_one(0);
        assert_eq!(below.to_string(), "invalid leverage 0: must be at least 1");

        let above = ValidationError::leverage_above_cap(101, 100);
        assert_eq!(
            above.to_string(),
            "invalid leverage 101: exceeds maximum of 100"
        );
    }

    #[test]
    fn invalid_state_transition_display() {
        let err = StateError::InvalidStateTransition {
            from: OrderStatus::Filled,
            to: OrderStatus::Cancelled,
        };
        assert_eq!(
            err.to_string(),
            "invalid order state transition: filled -> cancelled"
        );
    }
}
