// HTTP API Error Types
use axum::{response::IntoResponse, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::api::ValidationIssue;
use crate::source::RecordSourceError;

/// Client-facing message for any store or record-shape failure.
pub const FETCH_FAILED: &str = "Failed to fetch advocates";

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    ValidationError {
        message: String,
        details: Vec<ValidationIssue>,
    },

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::ValidationError { message, .. } => message,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Convert to JSON response body: `{ error, details? }`
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::ValidationError { message, details } => json!({
                "error": message,
                "details": details,
            }),
            _ => json!({ "error": self.message() }),
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn validation_error(message: impl Into<String>, details: Vec<ValidationIssue>) -> Self {
        ApiError::ValidationError {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

impl From<RecordSourceError> for ApiError {
    fn from(err: RecordSourceError) -> Self {
        // Log the real error but return generic message
        match &err {
            RecordSourceError::Database(db_err) => {
                tracing::error!("Error fetching advocates: {}", db_err);
            }
            RecordSourceError::InvalidRecord { id, reason } => {
                tracing::error!("Refusing to serve page: advocate {} failed validation: {}", id, reason);
            }
        }
        ApiError::internal_server_error(FETCH_FAILED)
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
