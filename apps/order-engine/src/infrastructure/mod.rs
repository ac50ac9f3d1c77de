//! Infrastructure Layer
//!
//! This module contains all adapters (implementations) for the ports defined
//! in the application layer. Following hexagonal architecture:
//!
//! - **Driven Adapters (Outbound)**: Implement ports for external systems
//!   - `persistence/`: Order store adapters (in-memory)
//!   - `matching/`: Matching authority adapters
//!   - `market/`: Market registry adapters
//!   - `risk/`: Leverage and margin checks
//!   - `positions/`: Position hand-off after fills
//!
//! - **Driver Adapters (Inbound)**: Expose application to external world
//!   - `http/`: REST API controllers
//!
//! - `config/`: Dependency injection container

pub mod config;
pub mod http;
pub mod market;
pub mod matching;
pub mod persistence;
pub mod positions;
pub mod risk;
