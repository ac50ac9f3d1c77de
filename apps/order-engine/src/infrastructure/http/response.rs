//! HTTP response bodies and error mapping.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, OrderServiceError};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests.
    pub status: String,
    /// RFC 3339 time of the probe.
    pub timestamp: String,
    /// `up` or `down`, from a persistence ping.
    pub db_status: String,
    /// Application version.
    pub version: String,
}

/// API error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Stable error code.
    pub code: ErrorCode,
    /// Error message.
    pub message: String,
    /// The order concerned, e.g. one left `Pending`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

/// Error returned by every order handler.
#[derive(Debug)]
pub enum ApiError {
    /// Failure reported by the order service.
    Service(OrderServiceError),
    /// Body or query could not be decoded.
    BadRequest(String),
}

impl From<OrderServiceError> for ApiError {
    fn from(err: OrderServiceError) -> Self {
        Self::Service(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self {
            Self::Service(err) => ApiErrorResponse {
                code: err.code(),
                message: err.to_string(),
                order_id: err.order_id().map(ToString::to_string),
            },
            Self::BadRequest(message) => ApiErrorResponse {
                code: ErrorCode::InvalidRequest,
                message,
                order_id: None,
            },
        };

        let status = body.code.http_status();
        if status.is_server_error() {
            tracing::warn!(code = %body.code, message = %body.message, "Request failed");
        } else {
            tracing::debug!(code = %body.code, message = %body.message, "Request refused");
        }

        (status, Json(body)).into_response()
    }
}

/// Plain-text body for `GET /`.
pub const BANNER: &str = "Perpetual DEX API";

/// Shortcut for handlers that answer 200 with JSON.
pub(super) fn ok<T: Serialize>(body: T) -> Response {
    (StatusCode::OK, Json(body)).into_response()
}
