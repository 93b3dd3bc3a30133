//! Error types for client operations

use serde_json::Value;
use thiserror::Error;

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Network/connection errors
    #[error("Connection error: {0}")]
    Connection(#[from] reqwest::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The service answered with an error envelope
    #[error("Server error (code {code}): {message}")]
    ServerError {
        code: i64,
        message: String,
        data: Option<Value>,
    },

    /// Non-2xx answer that carried no envelope
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Envelope error code, if the service produced one
    pub fn code(&self) -> Option<i64> {
        match self {
            ClientError::ServerError { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::Config(format!("Invalid URL: {}", err))
    }
}
