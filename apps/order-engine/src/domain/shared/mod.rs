//! Shared Domain Types
//!
//! Value objects shared across the order lifecycle and market contexts.

pub mod value_objects;

pub use value_objects::{AccountId, OrderId, PositionId, Symbol, Timestamp};
