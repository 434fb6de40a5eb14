use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_leads::LeadError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PropertyError {
    #[error("Property not found: {0}")]
    NotFound(Uuid),

    /// The lead a match was requested for does not exist
    #[error("Lead not found: {0}")]
    LeadNotFound(Uuid),

    /// The lead exists but its embedding has not been generated
    #[error("Lead {0} has no embedding yet")]
    MissingEmbedding(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type PropertyResult<T> = Result<T, PropertyError>;

impl From<LeadError> for PropertyError {
    fn from(err: LeadError) -> Self {
        match err {
            LeadError::NotFound(id) => PropertyError::LeadNotFound(id),
            LeadError::Validation(msg) => PropertyError::Validation(msg),
            LeadError::Storage(msg) => PropertyError::Storage(msg),
        }
    }
}

impl From<PropertyError> for AppError {
    fn from(err: PropertyError) -> Self {
        match err {
            PropertyError::NotFound(id) => {
                AppError::NotFound(format!("Property {} not found", id))
            }
            PropertyError::LeadNotFound(id) => AppError::NotFound(format!("Lead {} not found", id)),
            PropertyError::MissingEmbedding(id) => AppError::UnprocessableEntity(format!(
                "Lead {} has no embedding yet, retry once it has been generated",
                id
            )),
            PropertyError::Validation(msg) => AppError::BadRequest(msg),
            PropertyError::Storage(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for PropertyError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_codes() {
        let id = Uuid::new_v4();
        let cases = [
            (PropertyError::NotFound(id), StatusCode::NOT_FOUND),
            (PropertyError::LeadNotFound(id), StatusCode::NOT_FOUND),
            (
                PropertyError::MissingEmbedding(id),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                PropertyError::Validation("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                PropertyError::Storage("down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_lead_not_found_is_translated() {
        let id = Uuid::new_v4();
        let err: PropertyError = LeadError::NotFound(id).into();
        assert!(matches!(err, PropertyError::LeadNotFound(found) if found == id));
    }
}
