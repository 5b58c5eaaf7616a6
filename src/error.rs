//! Notifier error types with HTTP status code mapping.
//!
//! [`NotifierError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::EventId;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1002,
///     "message": "invalid notification type: explode"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see [`NotifierError`] code ranges).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                     |
/// |-----------|-----------------|---------------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request / 405           |
/// | 2000–2999 | Not Found       | 404 Not Found                   |
/// | 3000–3999 | Upstream/Server | 500 / 502 / 503                 |
#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    /// Request validation failed (malformed body, missing or bad fields).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Notification type is not one of `join`, `update`, `cancel`.
    #[error("invalid notification type: {0}")]
    InvalidActionType(String),

    /// The HTTP method is not supported on this route.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Event with the given ID does not exist.
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    /// Read from the data store failed.
    #[error("data store read failed: {0}")]
    UpstreamFetch(String),

    /// Write to the data store failed.
    #[error("data store write failed: {0}")]
    UpstreamWrite(String),

    /// The push gateway rejected or failed the batch.
    #[error("push dispatch failed: {0}")]
    Dispatch(String),

    /// The notification queue is full or no longer accepting work.
    #[error("notification queue unavailable: {0}")]
    QueueUnavailable(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl NotifierError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidActionType(_) => 1002,
            Self::MethodNotAllowed => 1003,
            Self::EventNotFound(_) => 2001,
            Self::Internal(_) => 3000,
            Self::UpstreamFetch(_) => 3001,
            Self::UpstreamWrite(_) => 3002,
            Self::Dispatch(_) => 3003,
            Self::QueueUnavailable(_) => 3004,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidActionType(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::EventNotFound(_) => StatusCode::NOT_FOUND,
            Self::UpstreamFetch(_) | Self::UpstreamWrite(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Dispatch(_) => StatusCode::BAD_GATEWAY,
            Self::QueueUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for NotifierError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
