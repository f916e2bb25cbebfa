// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::batch::BatchError;
use crate::database::DatabaseError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized (bad login password)
    Unauthorized(String),

    // 403 Forbidden (bad/missing bearer token)
    Forbidden(String),

    // 404 Not Found (referenced ItemID absent)
    NotFound(String),

    // 500 Internal Server Error
    Database(String),
    DatabaseConnection(String),
    BatchUpdateFailed(String),
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::Database(_) => 500,
            ApiError::DatabaseConnection(_) => 500,
            ApiError::BatchUpdateFailed(_) => 500,
            ApiError::InternalServerError(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Database(msg) => msg,
            ApiError::DatabaseConnection(msg) => msg,
            ApiError::BatchUpdateFailed(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Convert to JSON response body.
    ///
    /// A failed login additionally carries the explicit `success: false` flag
    /// that clients of this API expect; every other error body is `{ error }`.
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::Unauthorized(msg) => json!({ "success": false, "error": msg }),
            _ => json!({ "error": self.message() }),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

// Convert database-layer error types to ApiError. Internal detail is logged
// here and replaced by the fixed client-facing messages.
impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Connection(e) => {
                tracing::error!("DB connection error: {}", e);
                ApiError::DatabaseConnection("Database connection error".to_string())
            }
            DatabaseError::InvalidServerName(name) => {
                tracing::error!("Invalid database server name: {}", name);
                ApiError::DatabaseConnection("Database connection error".to_string())
            }
            DatabaseError::Sqlx(e) => {
                tracing::error!("Database error: {}", e);
                ApiError::Database("Database error".to_string())
            }
        }
    }
}

impl From<BatchError> for ApiError {
    fn from(err: BatchError) -> Self {
        match err {
            BatchError::InvalidPayload => {
                ApiError::BadRequest("Invalid updates data".to_string())
            }
            BatchError::MissingItem(id) => {
                ApiError::NotFound(format!("ItemID {} not found", id))
            }
            BatchError::Connection(e) => {
                tracing::error!("DB connection error: {}", e);
                ApiError::DatabaseConnection("Database connection error".to_string())
            }
            BatchError::Failed(e) => {
                tracing::error!("Batch update error: {}", e);
                ApiError::BatchUpdateFailed("Batch update failed".to_string())
            }
        }
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
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}
