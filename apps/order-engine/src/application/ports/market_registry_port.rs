//! Market Registry Port (Driven Port)
//!
//! Read access to listed markets and their current prices.

use async_trait::async_trait;

use crate::domain::market::Market;
use crate::domain::shared::Symbol;

/// Market registry errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarketRegistryError {
    /// The registry could not be reached.
    #[error("market registry unreachable: {message}")]
    Unreachable {
        /// Transport detail.
        message: String,
    },
}

/// Port for looking up markets.
#[async_trait]
pub trait MarketRegistryPort: Send + Sync {
    /// Current snapshot for `symbol`, or `None` if it is not listed.
    ///
    /// # Errors
    ///
    /// Returns error if the registry cannot be queried.
    async fn find_market(&self, symbol: &Symbol) -> Result<Option<Market>, MarketRegistryError>;
}
