use serde_json::{json, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message suitable for showing to the end user, without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::ValidationError(msg)
            | AppError::Conflict(msg)
            | AppError::Internal(msg) => msg,
        }
    }

    pub fn is_client_error(&self) -> bool {
        !matches!(self, AppError::Internal(_))
    }

    pub fn to_json(&self) -> Value {
        if !self.is_client_error() {
            tracing::error!("Error: {}", self);
        }

        json!({
            "error": self.message()
        })
    }
}
