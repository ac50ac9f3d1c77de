//! Account Bounded Context
//!
//! Account snapshots read by the risk collaborator. The order lifecycle
//! never mutates an account.

mod account;

pub use account::Account;
