//! Order State Machine Service
//!
//! The single authority on which status changes are legal.

use crate::domain::order_lifecycle::errors::StateError;
use crate::domain::order_lifecycle::value_objects::OrderStatus;

/// Order State Machine for validating transitions.
pub struct OrderStateMachine;

impl OrderStateMachine {
    /// Check if a state transition is valid.
    #[must_use]
    pub const fn is_valid_transition(from: OrderStatus, to: OrderStatus) -> bool {
        matches!(
            (from, to),
            // From Pending
            (OrderStatus::Pending, OrderStatus::Filled)
                | (OrderStatus::Pending, OrderStatus::PartiallyFilled)
                | (OrderStatus::Pending, OrderStatus::Rejected)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
                // From PartiallyFilled
                | (OrderStatus::PartiallyFilled, OrderStatus::PartiallyFilled)
                | (OrderStatus::PartiallyFilled, OrderStatus::Filled)
                | (OrderStatus::PartiallyFilled, OrderStatus::Cancelled)
        )
    }

    /// Validate a state transition.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` if the transition is not allowed.
    pub fn validate_transition(from: OrderStatus, to: OrderStatus) -> Result<(), StateError> {
        if Self::is_valid_transition(from, to) {
            Ok(())
        } else {
            Err(StateError::InvalidStateTransition { from, to })
        }
    }

    /// Get all valid next states from a given state.
    #[must_use]
    pub fn valid_next_states(from: OrderStatus) -> Vec<OrderStatus> {
        OrderStatus::ALL
            .into_iter()
            .filter(|to| Self::is_valid_transition(from, *to))
            .collect()
    }
}
