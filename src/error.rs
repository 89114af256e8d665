// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::{BackendError, RecordError};
use crate::roster::PerMinuteError;

/// Message returned when the backend answers without data or explanation
pub const FETCH_FALLBACK_MESSAGE: &str = "Failed to fetch player data";

/// Message returned when backend rows cannot be turned into statistics
pub const INVALID_DATA_MESSAGE: &str = "Invalid player data";

/// HTTP API error. Every variant renders as `{"error": "<message>"}`.
#[derive(Debug)]
pub enum ApiError {
    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }
}

impl ApiError {
    /// The one rejection every session-gated endpoint returns
    pub fn unauthorized() -> Self {
        ApiError::Unauthorized("Unauthorized".to_string())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }

    /// Backend answered with neither rows nor an error
    pub fn missing_data() -> Self {
        ApiError::InternalServerError(FETCH_FALLBACK_MESSAGE.to_string())
    }
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        tracing::error!("Roster backend error: {}", err);
        let message = err.to_string();
        if message.trim().is_empty() {
            ApiError::missing_data()
        } else {
            ApiError::internal_server_error(message)
        }
    }
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        // Row-level detail names columns; keep it in the logs
        tracing::error!("Rejected roster row: {}", err);
        ApiError::internal_server_error(INVALID_DATA_MESSAGE)
    }
}

impl From<PerMinuteError> for ApiError {
    fn from(err: PerMinuteError) -> Self {
        tracing::error!("Per-minute transform failed: {}", err);
        ApiError::internal_server_error(INVALID_DATA_MESSAGE)
    }
}

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
