//! HTTP request DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::order_lifecycle::{CancelReason, MatchDecision, OrderDraft};

/// Body of `POST /api/orders/create`.
///
/// Missing fields decode to their zero values and are then refused by
/// validation with the matching error kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Owning account.
    #[serde(default)]
    pub user_id: String,
    /// Market symbol.
    #[serde(default)]
    pub symbol: String,
    /// `buy` or `sell`.
    #[serde(default)]
    pub side: String,
    /// Requested size.
    #[serde(default)]
    pub size: f64,
    /// Limit price. Ignored for market orders.
    #[serde(default)]
    pub price: Option<f64>,
    /// `market` or `limit`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Leverage multiplier.
    #[serde(default)]
    pub leverage: i64,
}

impl From<CreateOrderRequest> for OrderDraft {
    fn from(req: CreateOrderRequest) -> Self {
        Self {
            account_id: req.user_id,
            symbol: req.symbol,
            side: req.side,
            kind: req.kind,
            size: req.size,
            price: req.price,
            leverage: req.leverage,
        }
    }
}

/// Query of `GET /api/orders/get`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderIdQuery {
    /// Order id.
    #[serde(default)]
    pub id: String,
}

/// Query of `GET /api/orders/user`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountQuery {
    /// Account id.
    #[serde(default)]
    pub user_id: String,
}

/// Body of `POST /api/orders/cancel`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelOrderRequest {
    /// Order id.
    #[serde(default)]
    pub id: String,
    /// Defaults to a user-requested cancellation.
    #[serde(default)]
    pub reason: Option<CancelReason>,
}

/// Body of `POST /api/orders/match`, sent by the matching authority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchDecisionRequest {
    /// Order id.
    #[serde(default)]
    pub id: String,
    /// The decision to apply.
    pub decision: MatchDecision,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_uses_wire_names() {
        let json = r#"{"userId":"u1","symbol":"BTC-PERP","side":"buy","size":0.5,"price":50000,"type":"limit","leverage":10}"#;
        let draft = OrderDraft::from(serde_json::from_str::<CreateOrderRequest>(json).unwrap());

        assert_eq!(draft.account_id, "u1");
        assert_eq!(draft.kind, "limit");
        assert_eq!(draft.price, Some(50000.0));
        assert_eq!(draft.leverage, 10);
    }

    #[test]
    fn create_request_missing_fields_default() {
        let req: CreateOrderRequest = serde_json::from_str(r#"{"symbol":"ETH-USDT"}"#).unwrap();
        assert!(req.user_id.is_empty());
        assert_eq!(req.size, 0.0);
        assert_eq!(req.price, None);
        assert_eq!(req.leverage, 0);
    }

    #[test]
    fn match_decision_request_nests_outcome() {
        let json = r#"{"id":"ord-1","decision":{"outcome":"rejected","reason":{"code":"NO_LIQUIDITY","message":"none"}}}"#;
        let req: MatchDecisionRequest = serde_json::from_str(json).unwrap();
        assert!(matches!(req.decision, MatchDecision::Rejected { .. }));
    }
}
