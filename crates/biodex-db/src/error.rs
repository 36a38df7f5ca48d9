//! Hosted backend error types.

use biodex_common::ApiError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend error [{status}]: {message}")]
    Api { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(what) => ApiError::NotFound(format!("{} not found", what)),
            DbError::Forbidden(msg) => ApiError::Forbidden(msg),
            DbError::Api { status, message } => match status {
                401 => ApiError::Unauthorized(message),
                403 => ApiError::Forbidden(message),
                404 => ApiError::NotFound(message),
                400 | 409 | 422 => ApiError::BadRequest(message),
                _ => ApiError::Upstream(message),
            },
            DbError::Http(e) => ApiError::Upstream(format!("Hosted backend unreachable: {}", e)),
            DbError::Serialization(e) => ApiError::Upstream(format!("Unexpected backend response: {}", e)),
        }
    }
}
