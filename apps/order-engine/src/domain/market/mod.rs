//! Market Bounded Context
//!
//! Read-only market snapshots and the position data the order lifecycle
//! hands off after fills.

mod market;
mod position;

pub use market::Market;
pub use position::{FillNotice, Position, PositionSide};
