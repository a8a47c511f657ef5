//! Crate-wide error type and its HTTP mapping.
//!
//! Every error surfaces to callers as a status code plus a short
//! machine-stable reason code; store-specific error text is never exposed.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Application error taxonomy.
///
/// - `Validation` — client error (400), rejected before any store access
/// - `NotFound` — normal outcome for unknown codes (404), never logged as an error
/// - `Conflict` — short code already taken (409), including lost insert races
/// - `ExhaustedAttempts` — code generation gave up after the attempt bound (500)
/// - `Unavailable` — store timeout or connectivity failure (500), safe to retry
/// - `Internal` — anything else (500)
#[derive(Debug)]
pub enum AppError {
    Validation {
        reason: &'static str,
        message: String,
        details: Value,
    },
    NotFound {
        message: String,
        details: Value,
    },
    Conflict {
        message: String,
        details: Value,
    },
    ExhaustedAttempts {
        message: String,
        details: Value,
    },
    Unavailable {
        message: String,
        details: Value,
    },
    Internal {
        message: String,
        details: Value,
    },
}

impl AppError {
    pub fn bad_request(reason: &'static str, message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            reason,
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn exhausted_attempts(message: impl Into<String>, details: Value) -> Self {
        Self::ExhaustedAttempts {
            message: message.into(),
            details,
        }
    }

    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// The machine-stable reason code exposed in response bodies.
    pub fn reason_code(&self) -> &'static str {
        match self {
            AppError::Validation { reason, .. } => reason,
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } => "code_taken",
            AppError::ExhaustedAttempts { .. } => "exhausted_attempts",
            AppError::Unavailable { .. } => "store_unavailable",
            AppError::Internal { .. } => "internal_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::ExhaustedAttempts { .. }
            | AppError::Unavailable { .. }
            | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::Validation { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Conflict { message, .. }
            | AppError::ExhaustedAttempts { message, .. }
            | AppError::Unavailable { message, .. }
            | AppError::Internal { message, .. } => message,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.reason_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.reason_code();

        if status.is_server_error() {
            tracing::error!(code, "{}", self.message());
        }

        let (message, details) = match self {
            AppError::Validation {
                message, details, ..
            }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details }
            | AppError::ExhaustedAttempts { message, details }
            | AppError::Unavailable { message, details }
            | AppError::Internal { message, details } => (message, details),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return AppError::conflict(
                    "Short code already exists",
                    json!({ "constraint": db.constraint() }),
                );
            }
        }

        tracing::error!("database error: {e}");
        AppError::internal("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "invalid_input",
            "Request validation failed",
            json!({ "errors": errors.to_string() }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_codes_are_stable() {
        assert_eq!(
            AppError::bad_request("invalid_url", "bad", json!({})).reason_code(),
            "invalid_url"
        );
        assert_eq!(
            AppError::not_found("missing", json!({})).reason_code(),
            "not_found"
        );
        assert_eq!(
            AppError::conflict("taken", json!({})).reason_code(),
            "code_taken"
        );
        assert_eq!(
            AppError::unavailable("down", json!({})).reason_code(),
            "store_unavailable"
        );
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::bad_request("invalid_code", "bad", json!({})).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("missing", json!({})).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::conflict("taken", json!({})).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::exhausted_attempts("gave up", json!({})).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::unavailable("down", json!({})).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display_includes_message() {
        let err = AppError::conflict("This code is already taken", json!({}));
        assert!(err.to_string().contains("already taken"));
        assert!(err.to_string().contains("code_taken"));
    }
}
