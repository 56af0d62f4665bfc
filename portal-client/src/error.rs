//! Client error types

use thiserror::Error;

use shared::AppError;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Backend rejected the request (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Payload failed backend validation (422)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal server error
    #[error("Server error: {0}")]
    Server(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) if e.is_timeout() => AppError::timeout(),
            ClientError::Http(e) => AppError::network(e.to_string()),
            ClientError::InvalidResponse(msg) => AppError::invalid_response(msg),
            ClientError::BadRequest(msg) => AppError::invalid_request(msg),
            ClientError::NotFound(msg) => AppError::not_found(msg),
            ClientError::Validation(msg) => AppError::validation(msg),
            ClientError::Server(msg) => AppError::internal(msg),
            ClientError::Serialization(e) => AppError::invalid_response(e.to_string()),
        }
    }
}
