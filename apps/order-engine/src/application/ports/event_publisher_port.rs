//! Event Publisher Port (Driven Port)
//!
//! Interface for publishing domain events to external systems.

use async_trait::async_trait;

use crate::domain::order_lifecycle::OrderEvent;

/// Event publishing error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EventPublishError {
    /// Connection error.
    #[error("Event publish connection error: {message}")]
    ConnectionError {
        /// Transport detail.
        message: String,
    },

    /// Publishing failed.
    #[error("Event publish failed: {message}")]
    PublishFailed {
        /// Adapter detail.
        message: String,
    },
}

/// Port for publishing domain events.
#[async_trait]
pub trait EventPublisherPort: Send + Sync {
    /// Publish order events.
    async fn publish_order_events(&self, events: Vec<OrderEvent>) -> Result<(), EventPublishError>;

    /// Publish a single order event.
    async fn publish_order_event(&self, event: OrderEvent) -> Result<(), EventPublishError> {
        self.publish_order_events(vec![event]).await
    }
}

/// Event publisher that drops everything after a debug log.
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisherPort for NoOpEventPublisher {
    async fn publish_order_events(&self, events: Vec<OrderEvent>) -> Result<(), EventPublishError> {
        for event in &events {
            tracing::debug!(
                order_id = %event.order_id(),
                event_type = event.event_type(),
                "Dropping order event"
            );
        }
        Ok(())
    }
}
