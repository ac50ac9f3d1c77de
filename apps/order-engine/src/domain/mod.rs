//! Domain Layer
//!
//! Pure business logic with no I/O.

pub mod account;
pub mod market;
pub mod order_lifecycle;
pub mod shared;
