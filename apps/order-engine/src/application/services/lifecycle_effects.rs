//! Best-effort side effects that follow a persisted transition.
//!
//! Neither event publication nor position application can undo a
//! transition once it is saved, so failures here are logged, not returned.

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::application::ports::{EventPublisherPort, PositionPort};
use crate::domain::market::FillNotice;
use crate::domain::order_lifecycle::Order;

/// Drain the order's pending events and hand them to the publisher.
pub async fn publish_events<E>(publisher: &E, order: &mut Order)
where
    E: EventPublisherPort + ?Sized,
{
    let events = order.drain_events();
    if events.is_empty() {
        return;
    }

    if let Err(e) = publisher.publish_order_events(events).await {
        tracing::warn!(order_id = %order.id(), error = %e, "Failed to publish order events");
    }
}

/// Fire the position side effect for `filled` size without awaiting it.
///
/// Returns `None` when nothing was filled.
pub fn dispatch_fill<P>(positions: &Arc<P>, order: &Order, filled: Decimal) -> Option<JoinHandle<()>>
where
    P: PositionPort + ?Sized + 'static,
{
    if filled <= Decimal::ZERO {
        return None;
    }

    let notice = FillNotice::for_order(order, filled);
    let positions = Arc::clone(positions);

    Some(tokio::spawn(
        async move {
            let order_id = notice.order_id.clone();
            if let Err(e) = positions.apply_fill(notice).await {
                tracing::error!(order_id = %order_id, error = %e, "Failed to apply fill to position");
            }
        }
        .in_current_span(),
    ))
}
