//! Order Validator
//!
//! Structural checks on raw submissions. Checks that need collaborators
//! (market listing, leverage cap, margin) are applied by the submit use
//! case in this order: market lookup, leverage cap, margin.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::domain::order_lifecycle::errors::ValidationError;
use crate::domain::order_lifecycle::value_objects::{OrderKind, OrderSide};
use crate::domain::shared::{AccountId, Symbol};

/// An order submission exactly as the caller sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    /// Owning account.
    pub account_id: String,
    /// Market symbol.
    pub symbol: String,
    /// `buy` or `sell`.
    pub side: String,
    /// `market` or `limit`.
    pub kind: String,
    /// Requested size.
    pub size: f64,
    /// Limit price. Ignored for market orders.
    pub price: Option<f64>,
    /// Requested leverage multiplier.
    pub leverage: i64,
}

/// A draft whose fields passed structural validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedDraft {
    /// Owning account, trimmed.
    pub account_id: AccountId,
    /// Normalized symbol.
    pub symbol: Symbol,
    /// Parsed side.
    pub side: OrderSide,
    /// Parsed kind.
    pub kind: OrderKind,
    /// Size, strictly positive.
    pub size: Decimal,
    /// Limit price, present and positive for limit orders only.
    pub limit_price: Option<Decimal>,
    /// Leverage, at least one. Not yet checked against the market cap.
    pub leverage: i64,
}

impl CheckedDraft {
    /// The price the order is recorded at: the limit price, or the mark
    /// price for market orders.
    #[must_use]
    pub fn effective_price(&self, mark_price: Decimal) -> Decimal {
        self.limit_price.unwrap_or(mark_price)
    }

    /// Size times `price`.
    ///
    /// # Errors
    ///
    /// Returns `NotionalOverflow` if the product does not fit in a `Decimal`.
    pub fn notional(&self, price: Decimal) -> Result<Decimal, ValidationError> {
        self.size
            .checked_mul(price)
            .ok_or_else(|| ValidationError::NotionalOverflow {
                size: self.size.to_string(),
                price: price.to_string(),
            })
    }
}

/// Stateless validator for order submissions.
pub struct OrderValidator;

impl OrderValidator {
    /// Run the structural checks, first failure wins.
    ///
    /// Order: account, symbol, side, kind, size, price, leverage floor,
    /// then the limit notional.
    ///
    /// # Errors
    ///
    /// Returns the `ValidationError` for the first failing field.
    pub fn check_structure(draft: &OrderDraft) -> Result<CheckedDraft, ValidationError> {
        let account_id = draft.account_id.trim();
        if account_id.is_empty() {
            return Err(ValidationError::EmptyField { field: "userId" });
        }

        let symbol = Symbol::new(draft.symbol.as_str());
        if symbol.is_empty() {
            return Err(ValidationError::EmptyField { field: "symbol" });
        }

        let side = OrderSide::from_wire(&draft.side).ok_or_else(|| ValidationError::InvalidSide {
            value: draft.side.clone(),
        })?;

        let kind = OrderKind::from_wire(&draft.kind).ok_or_else(|| ValidationError::InvalidKind {
            value: draft.kind.clone(),
        })?;

        let size = positive_decimal(draft.size).ok_or_else(|| ValidationError::InvalidSize {
            value: draft.size.to_string(),
        })?;

        let limit_price = if kind.requires_price() {
            let price = draft
                .price
                .and_then(positive_decimal)
                .ok_or(ValidationError::MissingPrice)?;
            Some(price)
        } else {
            None
        };

        if draft.leverage < 1 {
            return Err(ValidationError::leverage_below_one(draft.leverage));
        }

        let checked = CheckedDraft {
            account_id: AccountId::new(account_id),
            symbol,
            side,
            kind,
            size,
            limit_price,
            leverage: draft.leverage,
        };
        if let Some(price) = checked.limit_price {
            checked.notional(price)?;
        }
        Ok(checked)
    }

    /// Check leverage against the cap for the market.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLeverage` if `leverage` exceeds `max`.
    pub fn check_leverage_cap(leverage: i64, max: u32) -> Result<u32, ValidationError> {
        if leverage < 1 {
            return Err(ValidationError::leverage_below_one(leverage));
        }
        if leverage > i64::from(max) {
            return Err(ValidationError::leverage_above_cap(leverage, max));
        }
        u32::try_from(leverage).map_err(|_| ValidationError::leverage_above_cap(leverage, max))
    }
}

/// Converts a wire number to a strictly positive decimal, if it is one.
fn positive_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() || value <= 0.0 {
        return None;
    }
    Decimal::from_f64(value).filter(|d| d.is_sign_positive() && !d.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    fn draft() -> OrderDraft {
        OrderDraft {
            account_id: "u1".to_string(),
            symbol: "BTC-PERP".to_string(),
            side: "buy".to_string(),
            kind: "limit".to_string(),
            size: 0.5,
            price: Some(50_000.0),
            leverage: 10,
        }
    }

    #[test]
    fn valid_limit_draft() {
        let checked = OrderValidator::check_structure(&draft()).unwrap();
        assert_eq!(checked.account_id.as_str(), "u1");
        assert_eq!(checked.symbol.as_str(), "BTC-PERP");
        assert_eq!(checked.side, OrderSide::Buy);
        assert_eq!(checked.kind, OrderKind::Limit);
        assert_eq!(checked.size, dec!(0.5));
        assert_eq!(checked.limit_price, Some(dec!(50000)));
        assert_eq!(checked.leverage, 10);
    }

    #[test]
    fn market_draft_ignores_supplied_price() {
        let mut d = draft();
        d.kind = "market".to_string();
        d.price = Some(-3.0);

        let checked = OrderValidator::check_structure(&d).unwrap();
        assert_eq!(checked.limit_price, None);
        assert_eq!(checked.effective_price(dec!(50010)), dec!(50010));
    }

    #[test]
    fn limit_draft_uses_own_price() {
        let checked = OrderValidator::check_structure(&draft()).unwrap();
        assert_eq!(checked.effective_price(dec!(50010)), dec!(50000));
    }

    #[test_case("", "userId" ; "empty account")]
    #[test_case("   ", "userId" ; "blank account")]
    fn empty_account(account: &str, field: &'static str) {
        let mut d = draft();
        d.account_id = account.to_string();
        assert_eq!(
            OrderValidator::check_structure(&d),
            Err(ValidationError::EmptyField { field })
        );
    }

    #[test]
    fn empty_symbol() {
        let mut d = draft();
        d.symbol = " ".to_string();
        assert_eq!(
            OrderValidator::check_structure(&d),
            Err(ValidationError::EmptyField { field: "symbol" })
        );
    }

    #[test_case("hold" ; "unknown word")]
    #[test_case("BUY" ; "uppercase")]
    #[test_case("" ; "empty")]
    fn invalid_side(side: &str) {
        let mut d = draft();
        d.side = side.to_string();
        assert!(matches!(
            OrderValidator::check_structure(&d),
            Err(ValidationError::InvalidSide { .. })
        ));
    }

    #[test_case("stop" ; "unsupported kind")]
    #[test_case("Market" ; "capitalized")]
    fn invalid_kind(kind: &str) {
        let mut d = draft();
        d.kind = kind.to_string();
        assert!(matches!(
            OrderValidator::check_structure(&d),
            Err(ValidationError::InvalidKind { .. })
        ));
    }

    #[test_case(0.0 ; "zero")]
    #[test_case(-1.0 ; "negative")]
    #[test_case(f64::NAN ; "nan")]
    #[test_case(f64::INFINITY ; "infinite")]
    fn invalid_size(size: f64) {
        let mut d = draft();
        d.size = size;
        assert!(matches!(
            OrderValidator::check_structure(&d),
            Err(ValidationError::InvalidSize { .. })
        ));
    }

    #[test_case(None ; "absent")]
    #[test_case(Some(0.0) ; "zero")]
    #[test_case(Some(-5.0) ; "negative")]
    #[test_case(Some(f64::NAN) ; "nan")]
    fn limit_without_usable_price(price: Option<f64>) {
        let mut d = draft();
        d.price = price;
        assert_eq!(
            OrderValidator::check_structure(&d),
            Err(ValidationError::MissingPrice)
        );
    }

    #[test]
    fn size_below_decimal_precision_is_invalid() {
        let mut d = draft();
        d.size = 1e-30;
        assert!(matches!(
            OrderValidator::check_structure(&d),
            Err(ValidationError::InvalidSize { .. })
        ));
    }

    #[test]
    fn limit_notional_out_of_range() {
        let mut d = draft();
        d.size = 1e20;
        d.price = Some(1e20);
        assert!(matches!(
            OrderValidator::check_structure(&d),
            Err(ValidationError::NotionalOverflow { .. })
        ));
    }

    #[test]
    fn notional_is_size_times_price() {
        let mut d = draft();
        d.size = 2.0;
        let checked = OrderValidator::check_structure(&d).unwrap();
        assert_eq!(checked.notional(dec!(50010)), Ok(dec!(100020)));
        assert!(matches!(
            checked.notional(Decimal::MAX),
            Err(ValidationError::NotionalOverflow { .. })
        ));
    }

    #[test]
    fn leverage_below_one() {
        let mut d = draft();
        d.leverage = 0;
        assert_eq!(
            OrderValidator::check_structure(&d),
            Err(ValidationError::leverage_below_one(0))
        );
    }

    #[test]
    fn first_failure_wins() {
        let d = OrderDraft {
            account_id: String::new(),
            symbol: String::new(),
            side: "x".to_string(),
            kind: "y".to_string(),
            size: -1.0,
            price: None,
            leverage: 0,
        };
        assert_eq!(
            OrderValidator::check_structure(&d),
            Err(ValidationError::EmptyField { field: "userId" })
        );
    }

    #[test]
    fn leverage_cap() {
        assert_eq!(OrderValidator::check_leverage_cap(10, 100), Ok(10));
        assert_eq!(OrderValidator::check_leverage_cap(100, 100), Ok(100));
        assert_eq!(
            OrderValidator::check_leverage_cap(101, 100),
            Err(ValidationError::leverage_above_cap(101, 100))
        );
    }
}
