use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use guestlist_store::StoreError;
use thiserror::Error;

use crate::handler::StatusMessage;

/// Errors raised while configuring or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// A failed API request, rendered as `{message, status_code}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request!")]
    BadRequest,

    #[error("Guest with id {id} was not found")]
    NotFound { id: String },

    #[error("error saving guest to database: Guest with id {id} already exists")]
    Conflict { id: String },

    #[error("error deleting guest: {0}")]
    DeleteFailed(#[source] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::DeleteFailed(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => Self::NotFound { id },
            StoreError::Conflict { id } => Self::Conflict { id },
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(StatusMessage::new(self.to_string(), status))).into_response()
    }
}
