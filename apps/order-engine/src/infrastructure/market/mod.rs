//! Market Registry Adapters

mod static_registry;

pub use static_registry::StaticMarketRegistry;
