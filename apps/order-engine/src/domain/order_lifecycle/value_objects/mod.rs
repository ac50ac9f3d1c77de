//! Order Lifecycle Value Objects

mod match_decision;
mod order_kind;
mod order_side;
mod order_status;
mod reasons;

pub use match_decision::MatchDecision;
pub use order_kind::OrderKind;
pub use order_side::OrderSide;
pub use order_status::OrderStatus;
pub use reasons::{CancelReason, RejectReason};
