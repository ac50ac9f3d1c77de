//! Risk adapter enforcing configured leverage caps.
//!
//! Margin is checked against configured account snapshots: the balance,
//! multiplied by the order leverage, must cover the notional. Accounts
//! without a snapshot are approved and logged.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::application::ports::{MarginDecision, MarginRequest, RiskCheckError, RiskCheckPort};
use crate::domain::account::Account;
use crate::domain::shared::{AccountId, Symbol};

/// Per-symbol leverage caps with a default for unlisted symbols.
#[derive(Debug, Clone)]
pub struct LeverageCapRiskCheck {
    default_max: u32,
    caps: HashMap<Symbol, u32>,
    accounts: HashMap<AccountId, Account>,
}

impl LeverageCapRiskCheck {
    /// Create with a default cap and per-symbol overrides.
    #[must_use]
    pub fn new(default_max: u32, caps: impl IntoIterator<Item = (Symbol, u32)>) -> Self {
        Self {
            default_max,
            caps: caps.into_iter().collect(),
            accounts: HashMap::new(),
        }
    }

    /// Check margin for these accounts.
    #[must_use]
    pub fn with_accounts(mut self, accounts: impl IntoIterator<Item = Account>) -> Self {
        self.accounts
            .extend(accounts.into_iter().map(|account| (account.id.clone(), account)));
        self
    }

    /// The cap for `symbol`.
    #[must_use]
    pub fn cap_for(&self, symbol: &Symbol) -> u32 {
        self.caps.get(symbol).copied().unwrap_or(self.default_max)
    }
}

#[async_trait]
impl RiskCheckPort for LeverageCapRiskCheck {
    async fn max_leverage(&self, symbol: &Symbol) -> Result<u32, RiskCheckError> {
        Ok(self.cap_for(symbol))
    }

    async fn check_margin(&self, request: &MarginRequest) -> Result<MarginDecision, RiskCheckError> {
        let Some(account) = self.accounts.get(&request.account_id) else {
            tracing::debug!(
                account_id = %request.account_id,
                symbol = %request.symbol,
                notional = %request.notional,
                leverage = request.leverage,
                "No balance on record, approving margin"
            );
            return Ok(MarginDecision::Approved);
        };

        if account.covers(request.notional, request.leverage) {
            return Ok(MarginDecision::Approved);
        }

        tracing::info!(
            account_id = %request.account_id,
            balance = %account.balance,
            notional = %request.notional,
            leverage = request.leverage,
            "Margin denied"
        );
        Ok(MarginDecision::Denied {
            reason: format!(
                "balance {} at {}x leverage cannot cover notional {}",
                account.balance, request.leverage, request.notional
            ),
        })
    }
}
