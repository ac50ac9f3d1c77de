//! Order Aggregate

mod order;

pub use order::{CreateOrderCommand, Order};
