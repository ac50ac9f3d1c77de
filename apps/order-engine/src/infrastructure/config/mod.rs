//! Wiring of adapters into use cases.

mod container;

pub use container::Container;
