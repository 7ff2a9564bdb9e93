//! Application error type shared by the service layer and the HTTP adapter.
//!
//! Every variant carries a human-readable `message` and a JSON `details` payload.
//! The HTTP status code is decided once, in the [`IntoResponse`] implementation.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload returned to API clients.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The target URL failed validation.
    #[error("{message}")]
    InvalidUrl { message: String, details: Value },

    /// Malformed request payload or custom key.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// A key (or secret key) is already taken.
    #[error("{message}")]
    KeyAlreadyExists { message: String, details: Value },

    /// Random key generation ran out of attempts.
    #[error("{message}")]
    KeySpaceExhausted { message: String, details: Value },

    /// Missing or deactivated entity.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }

    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    /// Conflict on a specific key; the key is always echoed in `details`.
    pub fn key_already_exists(key: &str) -> Self {
        Self::KeyAlreadyExists {
            message: format!("Key '{}' already exists", key),
            details: json!({ "key": key }),
        }
    }

    pub fn key_space_exhausted(attempts: usize) -> Self {
        Self::KeySpaceExhausted {
            message: "Unable to generate unique key after multiple attempts. Namespace may be exhausted."
                .to_string(),
            details: json!({ "attempts": attempts }),
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
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

    /// Maps the error to its HTTP status and stable machine-readable code.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidUrl { .. } => (StatusCode::BAD_REQUEST, "invalid_url"),
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::KeyAlreadyExists { .. } => (StatusCode::CONFLICT, "key_already_exists"),
            AppError::KeySpaceExhausted { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, "key_space_exhausted")
            }
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code) = self.status_and_code();
        let (message, details) = match self {
            AppError::InvalidUrl { message, details }
            | AppError::Validation { message, details }
            | AppError::KeyAlreadyExists { message, details }
            | AppError::KeySpaceExhausted { message, details }
            | AppError::NotFound { message, details }
            | AppError::Internal { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, _) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Request validation failed", details)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

/// Translates database errors into application errors.
///
/// Unique violations on the `urls` table mean a key or secret key is already
/// taken and surface as [`AppError::KeyAlreadyExists`].
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        let constraint = db.constraint().unwrap_or_default().to_string();
        return AppError::KeyAlreadyExists {
            message: "Unique constraint violation".to_string(),
            details: json!({ "constraint": constraint }),
        };
    }

    tracing::error!(error = %e, "Database error");
    AppError::internal("Database error", json!({}))
}
