// crates/forms-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::validation::FormErrors;

/// Infrastructure errors: anything that is not the user's fault
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("User store error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of a failed `Form::validate`
#[derive(Error, Debug)]
pub enum FormError {
    /// The submission was rejected, per-field messages attached
    #[error("form validation failed: {0}")]
    Invalid(FormErrors),

    /// The user store could not be consulted
    #[error(transparent)]
    Store(#[from] AppError),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CFG_001",
            AppError::Store(_) => "STORE_001",
            AppError::Internal(_) => "INT_001",
            AppError::Io(_) => "IO_001",
            AppError::Json(_) => "JSON_001",
        }
    }

    /// Get a sanitized message suitable for production use
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::Config(_) | AppError::Internal(_) => {
                "An internal server error occurred".to_string()
            },
            AppError::Store(_) | AppError::Io(_) => {
                "Account data is temporarily unavailable".to_string()
            },
            AppError::Json(_) => "Invalid request format".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // Use detailed messages in development, sanitized in production
        let message = if cfg!(debug_assertions) {
            self.to_string()
        } else {
            self.sanitized_message()
        };

        let body = serde_json::json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

impl IntoResponse for FormErrors {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": {
                "code": "VAL_001",
                "message": "Form validation failed",
                "fields": self,
            }
        });

        (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response()
    }
}

impl IntoResponse for FormError {
    fn into_response(self) -> Response {
        match self {
            FormError::Invalid(errors) => errors.into_response(),
            FormError::Store(err) => err.into_response(),
        }
    }
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}
