//! Market registry backed by a fixed set of snapshots loaded from config.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::application::ports::{MarketRegistryError, MarketRegistryPort};
use crate::domain::market::Market;
use crate::domain::shared::Symbol;

/// Serves configured market snapshots. Prices never move.
#[derive(Debug, Clone, Default)]
pub struct StaticMarketRegistry {
    markets: HashMap<Symbol, Market>,
}

impl StaticMarketRegistry {
    /// Build from a list of markets. Later duplicates win.
    #[must_use]
    pub fn new(markets: impl IntoIterator<Item = Market>) -> Self {
        Self {
            markets: markets
                .into_iter()
                .map(|m| (m.symbol.clone(), m))
                .collect(),
        }
    }

    /// Listed symbols.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.markets.keys()
    }
}

#[async_trait]
impl MarketRegistryPort for StaticMarketRegistry {
    async fn find_market(&self, symbol: &Symbol) -> Result<Option<Market>, MarketRegistryError> {
        Ok(self.markets.get(symbol).cloned())
    }
}
