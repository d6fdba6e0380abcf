//! Domain-specific error types for reframe

use thiserror::Error;

/// Main error type for the reframe server
#[derive(Error, Debug)]
pub enum ReframeError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Generation service error: {message}")]
    Generation { message: String },

    #[error("Session error: {message}")]
    Session { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<anyhow::Error> for ReframeError {
    fn from(err: anyhow::Error) -> Self {
        ReframeError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ReframeError {
    fn from(err: serde_json::Error) -> Self {
        ReframeError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for ReframeError {
    fn from(err: reqwest::Error) -> Self {
        ReframeError::Generation {
            message: format!("HTTP request failed: {}", err),
        }
    }
}

/// Result type alias for reframe operations
pub type Result<T> = std::result::Result<T, ReframeError>;
