//! # API Errors
//!
//! Error types for the HTTP endpoints. Validation failures are not errors
//! here in the usual sense: they carry the issue list and map to 422.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::schema::ValidationErrors;
use crate::table::TableError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// No form registered under this name
    #[error("Form not found: {0}")]
    FormNotFound(String),

    /// Table query rejected
    #[error("Invalid table query: {0}")]
    InvalidQuery(#[from] TableError),

    /// Submission failed validation
    #[error("Submission failed validation")]
    Invalid(ValidationErrors),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::FormNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Invalid(errors)
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::Invalid(errors) => (
                status,
                Json(json!({ "status": "invalid", "errors": errors })),
            )
                .into_response(),
            other => {
                let body = ErrorResponse {
                    code: status.as_u16(),
                    error: other.to_string(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}
