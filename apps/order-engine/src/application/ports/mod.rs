//! Application Ports (Driver and Driven)
//!
//! Ports define interfaces for interacting with external systems.
//! - **Driver Ports** (Primary/Inbound): How the world uses our application
//! - **Driven Ports** (Secondary/Outbound): How our application uses external systems

mod event_publisher_port;
mod market_registry_port;
mod matching_port;
mod position_port;
mod risk_check_port;

pub use event_publisher_port::{EventPublishError, EventPublisherPort, NoOpEventPublisher};
pub use market_registry_port::{MarketRegistryError, MarketRegistryPort};
pub use matching_port::{MatchingError, MatchingPort};
pub use position_port::{PositionError, PositionPort};
pub use risk_check_port::{MarginDecision, MarginRequest, RiskCheckError, RiskCheckPort};
