//! Position sink that only logs what it would apply.

use async_trait::async_trait;

use crate::application::ports::{PositionError, PositionPort};
use crate::domain::market::{FillNotice, Position};

/// Logs each fill as the position it would open.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpPositionSink;

#[async_trait]
impl PositionPort for NoOpPositionSink {
    async fn apply_fill(&self, notice: FillNotice) -> Result<(), PositionError> {
        let position = Position::opened_by(&notice);
        tracing::info!(
            order_id = %notice.order_id,
            position_id = %position.id,
            account_id = %position.account_id,
            symbol = %position.symbol,
            side = ?position.side,
            size = %position.size,
            entry_price = %position.entry_price,
            leverage = position.leverage,
            "Fill received"
        );
        Ok(())
    }
}
