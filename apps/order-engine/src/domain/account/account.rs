//! Account (user) snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{AccountId, Timestamp};

/// A trading account and its cash balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Account identifier, the `userId` on orders.
    pub id: AccountId,
    /// Contact email.
    pub email: String,
    /// Cash balance in the quote asset.
    pub balance: Decimal,
    /// Opened at.
    pub created_at: Timestamp,
    /// Last changed at.
    pub updated_at: Timestamp,
}

impl Account {
    /// A snapshot stamped now.
    #[must_use]
    pub fn new(id: AccountId, email: impl Into<String>, balance: Decimal) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            email: email.into(),
            balance,
            created_at: now,
            updated_at: now,
        }
    }

    /// True when the balance, multiplied by `leverage`, covers `notional`.
    #[must_use]
    pub fn covers(&self, notional: Decimal, leverage: u32) -> bool {
        self.balance
            .checked_mul(Decimal::from(leverage))
            .is_none_or(|buying_power| buying_power >= notional)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn account(balance: Decimal) -> Account {
        Account::new(AccountId::new("u1"), "u1@example.com", balance)
    }

    #[test]
    fn new_stamps_equal_timestamps() {
        let account = account(dec!(1000));
        assert_eq!(account.id.as_str(), "u1");
        assert_eq!(account.email, "u1@example.com");
        assert_eq!(account.created_at, account.updated_at);
    }

    #[test]
    fn leverage_scales_balance() {
        let account = account(dec!(1000));
        assert!(account.covers(dec!(10000), 10));
        assert!(account.covers(dec!(9999.99), 10));
        assert!(!account.covers(dec!(10000.01), 10));
        assert!(!account.covers(dec!(1000.01), 1));
    }

    #[test]
    fn empty_balance_covers_nothing() {
        assert!(!account(Decimal::ZERO).covers(dec!(0.01), 100));
    }

    #[test]
    fn overflowing_buying_power_covers() {
        assert!(account(Decimal::MAX).covers(Decimal::MAX, 2));
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(account(dec!(5))).unwrap();
        assert_eq!(json["id"], "u1");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }
}
