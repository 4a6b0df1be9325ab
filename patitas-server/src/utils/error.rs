//! Unified error handling
//!
//! Application error enum plus the JSON error body returned by handlers.
//!
//! # Error code scheme
//!
//! | Prefix | Category | Example |
//! |--------|----------|---------|
//! | E0xxx | Business / request errors | E0003 not found |
//! | E9xxx | System errors | E9001 internal |

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde::Serialize;
use tracing::error;

/// JSON body for error responses
///
/// ```json
/// { "code": "E0003", "message": "Cage 42 not found" }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Business / request errors (4xx) ==========
    #[error("Resource not found: {0}")]
    /// Missing resource (404)
    NotFound(String),

    #[error("Resource conflict: {0}")]
    /// State conflict, e.g. cage already occupied (409)
    Conflict(String),

    #[error("Validation failed: {0}")]
    /// Form-level validation failure (400)
    Validation(String),

    #[error("Business rule violation: {0}")]
    /// Domain rule violated (422)
    BusinessRule(String),

    // ========== System errors (5xx) ==========
    #[error("Internal server error: {0}")]
    /// Unexpected failure (500)
    Internal(String),

    #[error("Service unavailable: {0}")]
    /// Downstream (backend, printer) unreachable (503)
    Unavailable(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn business_rule(msg: impl Into<String>) -> Self {
        Self::BusinessRule(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E0004", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.clone()),
            AppError::BusinessRule(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "E0005", msg.clone())
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error".to_string(),
                )
            }
            AppError::Unavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "E9003", msg.clone())
            }
        };

        let body = Json(ErrorBody {
            code: code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Internal(format!("Serialization error: {}", e))
    }
}
