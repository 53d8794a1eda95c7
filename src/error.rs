// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::identity::IdentityError;
use crate::store::StoreError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request (malformed/missing input, identity-creation failure)
    BadRequest(String),

    // 401 Unauthorized (no credential presented)
    Unauthorized(String),

    // 403 Forbidden (invalid credential or ownership denied)
    Forbidden(String),

    // 500 Internal Server Error (unexpected collaborator failure)
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::InternalServerError(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
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

// Convert collaborator error types to ApiError.
//
// These mappings are the whole propagation policy: every handler returns
// Result<_, ApiError> and lets `?` route collaborator failures through here,
// so nothing escapes unhandled to a generic fault.
impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            // Policy violations (duplicate email, weak password) surface as 400
            // with the collaborator's own error text.
            IdentityError::Rejected(msg) => ApiError::bad_request(msg),
            IdentityError::InvalidToken(_) => ApiError::forbidden("Invalid token"),
            IdentityError::Unavailable(msg) => {
                tracing::error!("identity service failure: {}", msg);
                ApiError::internal_server_error(format!("An error occurred: {}", msg))
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let msg = err.to_string();
        tracing::error!("document store failure: {}", msg);
        ApiError::internal_server_error(format!("An error occurred: {}", msg))
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
