//! Error taxonomy for the order engine.
//!
//! Every failure surfaced by a use case is an [`OrderServiceError`]. Each
//! variant maps to a stable [`ErrorCode`], and each code to one HTTP status.
//!
//! | Status | Codes |
//! |--------|-------|
//! | 400 | validation failures, `INVALID_ARGUMENT`, `INVALID_REQUEST` |
//! | 404 | `ORDER_NOT_FOUND` |
//! | 408 | `CANCELLED` |
//! | 409 | `INVALID_STATE_TRANSITION`, `CONCURRENT_MODIFICATION`, `INVALID_FILL_REMAINING` |
//! | 503 | `MATCHING_UNAVAILABLE`, `PERSISTENCE_UNAVAILABLE`, `MARKET_REGISTRY_UNAVAILABLE`, `RISK_UNAVAILABLE` |

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::order_lifecycle::{StateError, ValidationError};
use crate::domain::shared::OrderId;

/// Stable, machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (400)
    /// Malformed request body or query.
    InvalidRequest,
    /// A required text field was empty.
    EmptyField,
    /// Side not `buy`/`sell`.
    InvalidSide,
    /// Kind not `market`/`limit`.
    InvalidKind,
    /// Size not a positive finite number.
    InvalidSize,
    /// Limit order without a usable price.
    MissingPrice,
    /// Size times price out of range.
    NotionalOverflow,
    /// Leverage out of bounds.
    InvalidLeverage,
    /// Symbol not listed.
    UnknownSymbol,
    /// Margin refused.
    InsufficientMargin,
    /// Empty lookup argument.
    InvalidArgument,

    // Not found (404)
    /// No order with the requested id.
    OrderNotFound,

    // State errors (409)
    /// Transition not allowed from the current status.
    InvalidStateTransition,
    /// Another transition on the order is in flight.
    ConcurrentModification,
    /// Partial fill that does not shrink the open size.
    InvalidFillRemaining,

    // Collaborator errors (503)
    /// Matching authority unreachable or timed out.
    MatchingUnavailable,
    /// Persistence store failed.
    PersistenceUnavailable,
    /// Market registry unreachable.
    MarketRegistryUnavailable,
    /// Risk collaborator unreachable.
    RiskUnavailable,

    // Cancellation (408)
    /// The caller abandoned the request.
    Cancelled,
}

impl ErrorCode {
    /// The HTTP status the transport answers with.
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest
            | Self::EmptyField
            | Self::InvalidSide
            | Self::InvalidKind
            | Self::InvalidSize
            | Self::MissingPrice
            | Self::NotionalOverflow
            | Self::InvalidLeverage
            | Self::UnknownSymbol
            | Self::InsufficientMargin
            | Self::InvalidArgument => StatusCode::BAD_REQUEST,

            Self::OrderNotFound => StatusCode::NOT_FOUND,

            Self::InvalidStateTransition
            | Self::ConcurrentModification
            | Self::InvalidFillRemaining => StatusCode::CONFLICT,

            Self::MatchingUnavailable
            | Self::PersistenceUnavailable
            | Self::MarketRegistryUnavailable
            | Self::RiskUnavailable => StatusCode::SERVICE_UNAVAILABLE,

            Self::Cancelled => StatusCode::REQUEST_TIMEOUT,
        }
    }

    /// The wire string for this code.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::EmptyField => "EMPTY_FIELD",
            Self::InvalidSide => "INVALID_SIDE",
            Self::InvalidKind => "INVALID_KIND",
            Self::InvalidSize => "INVALID_SIZE",
            Self::MissingPrice => "MISSING_PRICE",
            Self::NotionalOverflow => "NOTIONAL_OVERFLOW",
            Self::InvalidLeverage => "INVALID_LEVERAGE",
            Self::UnknownSymbol => "UNKNOWN_SYMBOL",
            Self::InsufficientMargin => "INSUFFICIENT_MARGIN",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            Self::ConcurrentModification => "CONCURRENT_MODIFICATION",
            Self::InvalidFillRemaining => "INVALID_FILL_REMAINING",
            Self::MatchingUnavailable => "MATCHING_UNAVAILABLE",
            Self::PersistenceUnavailable => "PERSISTENCE_UNAVAILABLE",
            Self::MarketRegistryUnavailable => "MARKET_REGISTRY_UNAVAILABLE",
            Self::RiskUnavailable => "RISK_UNAVAILABLE",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.reason())
    }
}

impl ValidationError {
    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyField { .. } => ErrorCode::EmptyField,
            Self::InvalidSide { .. } => ErrorCode::InvalidSide,
            Self::InvalidKind { .. } => ErrorCode::InvalidKind,
            Self::InvalidSize { .. } => ErrorCode::InvalidSize,
            Self::MissingPrice => ErrorCode::MissingPrice,
            Self::NotionalOverflow { .. } => ErrorCode::NotionalOverflow,
            Self::InvalidLeverage { .. } => ErrorCode::InvalidLeverage,
            Self::UnknownSymbol { .. } => ErrorCode::UnknownSymbol,
            Self::InsufficientMargin { .. } => ErrorCode::InsufficientMargin,
        }
    }
}

impl StateError {
    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidStateTransition { .. } => ErrorCode::InvalidStateTransition,
            Self::ConcurrentModification { .. } => ErrorCode::ConcurrentModification,
            Self::InvalidRemaining { .. } => ErrorCode::InvalidFillRemaining,
        }
    }
}

/// A collaborator the lifecycle depends on failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    /// Matching did not answer in time. The order was persisted as `Pending`.
    #[error("matching unavailable for order {order_id}: {reason}")]
    MatchingUnavailable {
        /// The order left `Pending`.
        order_id: OrderId,
        /// What went wrong.
        reason: String,
    },

    /// The persistence store failed.
    #[error("persistence {operation} failed: {message}")]
    Persistence {
        /// Repository operation.
        operation: &'static str,
        /// Adapter detail.
        message: String,
        /// Order involved, if any.
        order_id: Option<OrderId>,
        /// True when an earlier save already recorded the order as `Pending`.
        left_pending: bool,
    },

    /// The market registry failed.
    #[error("market registry unavailable: {message}")]
    MarketRegistryUnavailable {
        /// Adapter detail.
        message: String,
    },

    /// The risk collaborator failed.
    #[error("risk check unavailable: {message}")]
    RiskUnavailable {
        /// Adapter detail.
        message: String,
    },
}

impl CollaboratorError {
    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MatchingUnavailable { .. } => ErrorCode::MatchingUnavailable,
            Self::Persistence { .. } => ErrorCode::PersistenceUnavailable,
            Self::MarketRegistryUnavailable { .. } => ErrorCode::MarketRegistryUnavailable,
            Self::RiskUnavailable { .. } => ErrorCode::RiskUnavailable,
        }
    }
}

/// Every failure an order lifecycle or directory operation can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderServiceError {
    /// The submission failed intake checks.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A lookup argument was empty.
    #[error("{field} must not be empty")]
    InvalidArgument {
        /// Wire name of the argument.
        field: &'static str,
    },

    /// No order with this id.
    #[error("order not found: {order_id}")]
    NotFound {
        /// The requested id.
        order_id: OrderId,
    },

    /// A lifecycle transition was refused.
    #[error(transparent)]
    State(#[from] StateError),

    /// A collaborator failed.
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    /// The caller cancelled the operation.
    #[error("operation cancelled")]
    Cancelled {
        /// Order involved, if one had been created.
        order_id: Option<OrderId>,
        /// True when the order was persisted and remains `Pending`.
        left_pending: bool,
    },
}

impl OrderServiceError {
    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(e) => e.code(),
            Self::InvalidArgument { .. } => ErrorCode::InvalidArgument,
            Self::NotFound { .. } => ErrorCode::OrderNotFound,
            Self::State(e) => e.code(),
            Self::Collaborator(e) => e.code(),
            Self::Cancelled { .. } => ErrorCode::Cancelled,
        }
    }

    /// The order this error concerns, when one exists.
    #[must_use]
    pub const fn order_id(&self) -> Option<&OrderId> {
        match self {
            Self::NotFound { order_id }
            | Self::State(StateError::ConcurrentModification { order_id })
            | Self::Collaborator(CollaboratorError::MatchingUnavailable { order_id, .. }) => {
                Some(order_id)
            }
            Self::Collaborator(CollaboratorError::Persistence { order_id, .. })
            | Self::Cancelled { order_id, .. } => order_id.as_ref(),
            _ => None,
        }
    }
}
