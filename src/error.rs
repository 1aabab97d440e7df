//! Error types for the RAG system

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for RAG operations
pub type Result<T> = std::result::Result<T, Error>;

/// RAG system errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed or invalid API request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unsupported file extension
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// Format-specific text extraction failure
    #[error("Failed to load '{filename}': {message}")]
    Load { filename: String, message: String },

    /// Embedding or vector-store failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Generative-model invocation failure
    #[error("Generation error: {0}")]
    Generation(String),

    /// A template placeholder was left unbound
    #[error("Template '{template}' is missing variable '{variable}'")]
    MissingVariable { template: String, variable: String },

    /// External-service call exceeded its deadline
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a load error
    pub fn load(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Load {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Create a generation error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            Error::Config(msg) => (StatusCode::BAD_REQUEST, "config_error", msg.clone()),
            Error::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            Error::UnsupportedFormat(ext) => (
                StatusCode::BAD_REQUEST,
                "unsupported_type",
                format!("Unsupported file type: {}", ext),
            ),
            Error::Load { filename, message } => (
                StatusCode::BAD_REQUEST,
                "load_error",
                format!("Failed to load '{}': {}", filename, message),
            ),
            Error::Storage(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", msg.clone())
            }
            Error::Generation(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "generation_error", msg.clone())
            }
            Error::MissingVariable { template, variable } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "template_error",
                format!("Template '{}' is missing variable '{}'", template, variable),
            ),
            Error::Timeout(msg) => (StatusCode::GATEWAY_TIMEOUT, "timeout", msg.clone()),
            Error::Io(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "io_error",
                err.to_string(),
            ),
            Error::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
