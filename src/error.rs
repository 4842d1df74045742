use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::db::StoreError;
use crate::models::UnknownKind;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("invalid relationship kind: {0}")]
    InvalidKind(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    UnknownEntity(String),

    #[error("graph store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("internal server error: {0}")]
    Internal(String),
}

impl From<UnknownKind> for AppError {
    fn from(err: UnknownKind) -> Self {
        AppError::InvalidKind(err.0)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MissingNode(id) => AppError::UnknownEntity(id),
            StoreError::Unavailable(msg) => AppError::StoreUnavailable(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidKind(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::UnknownEntity(_) => StatusCode::NOT_FOUND,
            AppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
