use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// A vector text that could not be decoded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VectorParseError {
    /// The text is not wrapped in `[` and `]`
    #[error("vector text must be enclosed in brackets: '{0}'")]
    Unbracketed(String),

    #[error("failed to parse vector element {index}: '{token}': {reason}")]
    Element {
        /// Zero-based position of the offending element
        index: usize,
        token: String,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// The model service failed: transport, timeout, non-200 or malformed body.
    #[error("embedding service error: {0}")]
    Service(String),

    /// Persisting a generated vector failed.
    #[error("failed to store embedding: {0}")]
    Storage(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

impl From<reqwest::Error> for EmbeddingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EmbeddingError::Service(format!("request timed out: {}", err))
        } else if err.is_decode() {
            EmbeddingError::Service(format!("malformed response: {}", err))
        } else {
            EmbeddingError::Service(err.to_string())
        }
    }
}

impl From<EmbeddingError> for AppError {
    fn from(err: EmbeddingError) -> Self {
        match err {
            EmbeddingError::Service(msg) => AppError::ServiceUnavailable(msg),
            EmbeddingError::Storage(msg) => AppError::Database(msg),
            EmbeddingError::Config(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for EmbeddingError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
