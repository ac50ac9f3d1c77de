//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod order_directory;
mod submit_order;
mod transition_order;

pub use order_directory::OrderDirectory;
pub use submit_order::SubmitOrderUseCase;
pub use transition_order::TransitionOrderUseCase;
