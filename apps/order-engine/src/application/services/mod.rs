//! Application Services
//!
//! Coordination shared by several use cases.

mod lifecycle_effects;
mod order_locks;

pub use lifecycle_effects::{dispatch_fill, publish_events};
pub use order_locks::{OrderLockGuard, OrderLockRegistry};
