use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::features::checklists::services::SubmissionRejection;
use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    /// Definitions, vehicles, history or corrections could not be loaded
    #[error("Load failure: {0}")]
    LoadFailure(String),

    /// Submission preconditions not met; nothing was sent to persistence
    #[error("Submission rejected: {0}")]
    Submission(#[from] SubmissionRejection),

    /// Persistence refused or failed the checklist submission
    #[error("Submission failed: {0}")]
    SubmissionFailure(String),

    #[error("Corrective action could not be saved: {0}")]
    CorrectionSaveFailure(String),
}

impl AppError {
    /// Message of the underlying failure without the variant prefix
    pub fn detail(&self) -> String {
        match self {
            AppError::Database(e) => match e {
                sqlx::Error::Database(db) => db.message().to_string(),
                other => other.to_string(),
            },
            AppError::NotFound(msg)
            | AppError::Validation(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg)
            | AppError::Internal(msg)
            | AppError::LoadFailure(msg)
            | AppError::SubmissionFailure(msg)
            | AppError::CorrectionSaveFailure(msg) => msg.clone(),
            AppError::Submission(rejection) => rejection.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                    None,
                )
            }
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
            ),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, msg.clone(), None),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::LoadFailure(ref msg) => {
                tracing::warn!("Load failure: {}", msg);
                (StatusCode::BAD_GATEWAY, msg.clone(), None)
            }
            AppError::Submission(ref rejection) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                rejection.to_string(),
                Some(rejection.item_ids().to_vec()),
            ),
            AppError::SubmissionFailure(ref msg) => {
                tracing::error!("Submission failure: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    format!("Checklist submission failed: {}", msg),
                    None,
                )
            }
            AppError::CorrectionSaveFailure(ref msg) => {
                tracing::error!("Correction save failure: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    format!("Corrective action could not be saved: {}", msg),
                    None,
                )
            }
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_rejection_maps_to_unprocessable_entity() {
        let err = AppError::from(SubmissionRejection::NoVehicleSelected);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_detail_drops_variant_prefix() {
        let internal = AppError::Internal("storage unavailable".to_string());
        assert_eq!(internal.detail(), "storage unavailable");

        let database = AppError::Database(sqlx::Error::PoolTimedOut);
        assert_eq!(database.detail(), sqlx::Error::PoolTimedOut.to_string());
    }

    #[test]
    fn test_boundary_failures_map_to_bad_gateway() {
        let submit = AppError::SubmissionFailure("connection reset".to_string()).into_response();
        let correction = AppError::CorrectionSaveFailure("timeout".to_string()).into_response();
        let load = AppError::LoadFailure("definitions unavailable".to_string()).into_response();

        assert_eq!(submit.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(correction.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(load.status(), StatusCode::BAD_GATEWAY);
    }
}
