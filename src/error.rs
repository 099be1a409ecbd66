use crate::common::{ApiResponse, StatusCode};
use crate::record::PatchError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CrudError>;

/// Ready-made error type for repository implementations.
///
/// Controllers never translate repository errors, so the HTTP status a client
/// sees is decided here (or by whatever error type a repository picks instead).
#[derive(Debug, Error)]
pub enum CrudError {
    #[error("Record not found: {id}")]
    NotFound { id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Patch(#[from] PatchError),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl CrudError {
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound { id: id.to_string() }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CrudError::NotFound { .. } => StatusCode::NotFound,
            CrudError::Conflict(_) => StatusCode::Conflict,
            CrudError::Patch(_) => StatusCode::UnprocessableEntity,
            CrudError::Storage(_) => StatusCode::InternalServerError,
        }
    }
}

impl From<tokio::task::JoinError> for CrudError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Storage(anyhow::Error::new(err))
    }
}

impl axum::response::IntoResponse for CrudError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match &self {
            CrudError::Storage(err) => {
                tracing::error!(error = ?err, "repository storage failure");
                "Internal Server Error".to_string()
            }
            _ => self.to_string(),
        };
        ApiResponse::<()>::error(status, message).into_response()
    }
}
