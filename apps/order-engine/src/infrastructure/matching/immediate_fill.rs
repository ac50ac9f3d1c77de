//! Matching adapter that fills every order in full on submission.
//!
//! Stands in for a real matching engine: no book, no price discovery.

use async_trait::async_trait;

use crate::application::ports::{MatchingError, MatchingPort};
use crate::domain::order_lifecycle::{MatchDecision, Order};

/// Answers `Filled` for every order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateFillMatcher;

impl ImmediateFillMatcher {
    /// Create a new matcher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MatchingPort for ImmediateFillMatcher {
    async fn submit_for_matching(&self, order: &Order) -> Result<MatchDecision, MatchingError> {
        tracing::debug!(
            order_id = %order.id(),
            symbol = %order.symbol(),
            size = %order.remaining_size(),
            "Filling order immediately"
        );
        Ok(MatchDecision::Filled)
    }
}
