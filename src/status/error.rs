//! Status API Error Types
//!
//! This module defines error types specific to the status API and their
//! mapping onto HTTP responses.

use axum::response::{IntoResponse, Json, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Result type for status API operations
pub type StatusResult<T> = Result<T, StatusError>;

/// Status API error types
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response for API endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub message: String,

    /// Optional detailed error information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for StatusError {
    fn into_response(self) -> Response {
        let (status, message, details) = match &self {
            StatusError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                "Resource not found".to_string(),
                Some(msg.clone()),
            ),
            StatusError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "Bad request".to_string(),
                Some(msg.clone()),
            ),
            StatusError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                Some(msg.clone()),
            ),
        };

        let error_response = ErrorResponse { message, details };
        (status, Json(error_response)).into_response()
    }
}
