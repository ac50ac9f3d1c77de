//! Account balances served to the risk check.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::account::Account;
use crate::domain::shared::AccountId;

/// One configured account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSeed {
    /// Account identifier.
    pub id: AccountId,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Cash balance in the quote asset.
    pub balance: Decimal,
}

impl AccountSeed {
    /// Snapshot stamped at load time.
    #[must_use]
    pub fn to_account(&self) -> Account {
        Account::new(self.id.clone(), self.email.clone(), self.balance)
    }
}
