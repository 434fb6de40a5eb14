use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum LeadError {
    #[error("Lead not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type LeadResult<T> = Result<T, LeadError>;

impl From<LeadError> for AppError {
    fn from(err: LeadError) -> Self {
        match err {
            LeadError::NotFound(id) => AppError::NotFound(format!("Lead {} not found", id)),
            LeadError::Validation(msg) => AppError::BadRequest(msg),
            LeadError::Storage(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for LeadError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
