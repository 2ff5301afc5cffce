//! Typed error handling for quill
//!
//! Every handler returns `Result<_, AppError>`; the error converts itself
//! into an HTTP response, so `?` is the only error plumbing handlers need.
//!
//! # Error Categories
//!
//! - `MissingField`: a required form field was absent or empty → 400
//! - `EntryNotFound`: an unknown entry identifier → 404
//! - `Forbidden`: missing secret privilege or a bad CSRF token → 403
//! - `Render`: template rendering failed → 500
//! - `Internal`: storage or other unexpected failure → 500
//!
//! A failed login is deliberately NOT an error — the login handler
//! re-renders its form instead of surfacing a distinct error response.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The error type shared by all request handlers
#[derive(Debug)]
pub enum AppError {
    /// A required form field was missing or empty
    MissingField { field: &'static str },

    /// No entry exists with the requested identifier
    EntryNotFound { id: i64 },

    /// The request lacks the secret privilege or carries a bad CSRF token
    Forbidden { message: String },

    /// Template rendering failed
    Render { message: String },

    /// Unexpected internal failure (storage, lock poisoning, ...)
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingField { field } => {
                write!(f, "Missing required field '{}'", field)
            }
            AppError::EntryNotFound { id } => {
                write!(f, "Journal entry with id '{}' not found", id)
            }
            AppError::Forbidden { message } => write!(f, "Forbidden: {}", message),
            AppError::Render { message } => write!(f, "Template error: {}", message),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingField { .. } => StatusCode::BAD_REQUEST,
            AppError::EntryNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::Render { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::MissingField { .. } => "MISSING_FIELD",
            AppError::EntryNotFound { .. } => "ENTRY_NOT_FOUND",
            AppError::Forbidden { .. } => "FORBIDDEN",
            AppError::Render { .. } => "RENDER_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<tera::Error> for AppError {
    fn from(err: tera::Error) -> Self {
        AppError::Render {
            message: err.to_string(),
        }
    }
}

/// Storage methods surface `anyhow::Error`; anything reaching a handler
/// through that seam is an internal failure.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// A specialized Result type for quill handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_is_bad_request() {
        let err = AppError::MissingField { field: "title" };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "MISSING_FIELD");
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_entry_not_found_is_404() {
        let err = AppError::EntryNotFound { id: 42 };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "ENTRY_NOT_FOUND");
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_forbidden_is_403() {
        let err = AppError::Forbidden {
            message: "secret privilege required".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.error_code(), "FORBIDDEN");
    }

    #[test]
    fn test_internal_errors_are_500() {
        assert_eq!(
            AppError::Internal("lock poisoned".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Render {
                message: "bad template".to_string()
            }
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_anyhow() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_error_response_body() {
        let err = AppError::EntryNotFound { id: 7 };
        let body = err.to_response();
        assert_eq!(body.code, "ENTRY_NOT_FOUND");
        assert!(body.message.contains("7"));

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], "ENTRY_NOT_FOUND");
    }
}
