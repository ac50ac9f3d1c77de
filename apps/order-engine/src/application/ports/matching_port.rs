//! Matching Port (Driven Port)
//!
//! Interface to the matching / execution authority that decides fills.

use async_trait::async_trait;

use crate::domain::order_lifecycle::{MatchDecision, Order};

/// Matching authority errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchingError {
    /// The matching engine could not be reached.
    #[error("matching engine unreachable: {message}")]
    Unreachable {
        /// Transport detail.
        message: String,
    },

    /// The matching engine answered with something unusable.
    #[error("matching engine protocol error: {message}")]
    Protocol {
        /// What was wrong with the answer.
        message: String,
    },
}

/// Port for handing orders to the matching authority.
#[async_trait]
pub trait MatchingPort: Send + Sync {
    /// Submit a `Pending` order and wait for the decision.
    ///
    /// # Errors
    ///
    /// Returns error if no decision could be obtained.
    async fn submit_for_matching(&self, order: &Order) -> Result<MatchDecision, MatchingError>;
}
