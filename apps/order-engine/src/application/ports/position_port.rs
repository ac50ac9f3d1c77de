//! Position Port (Driven Port)
//!
//! Receives fill notices so positions can be opened or adjusted.

use async_trait::async_trait;

use crate::domain::market::FillNotice;

/// Position collaborator errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    /// The position service could not be reached.
    #[error("position service unreachable: {message}")]
    Unreachable {
        /// Transport detail.
        message: String,
    },
}

/// Port for applying fills to positions.
#[async_trait]
pub trait PositionPort: Send + Sync {
    /// Apply one fill.
    ///
    /// # Errors
    ///
    /// Returns error if the fill could not be applied.
    async fn apply_fill(&self, notice: FillNotice) -> Result<(), PositionError>;
}
