use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::envelope::{ErrorKind, ResultEnvelope};
use serde::Serialize;
use thiserror::Error;

/// Failure of a business operation. The message is what the client sees.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad or missing input, caught before any store call
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    /// The store rejected or failed the call
    #[error("{0}")]
    Persistence(String),
    /// Caller lacks the required scope
    #[error("{0}")]
    Authorization(String),
    /// Login or re-authentication credential mismatch
    #[error("{0}")]
    Authentication(String),
    /// Out-of-band collaborator (mail) failed
    #[error("{0}")]
    External(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Persistence(_) => ErrorKind::Persistence,
            Self::Authorization(_) => ErrorKind::Authorization,
            Self::Authentication(_) => ErrorKind::Authentication,
            Self::External(_) => ErrorKind::External,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Authorization(_) => StatusCode::FORBIDDEN,
            Self::Authentication(_) => StatusCode::UNAUTHORIZED,
            Self::External(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Persistence(format!("Database error: {}", e))
    }
}

/// Conversion of a service outcome into the client-facing envelope
pub trait IntoEnvelope<T> {
    fn into_envelope(self) -> ResultEnvelope<T>;
}

impl<T> IntoEnvelope<T> for AppResult<T> {
    fn into_envelope(self) -> ResultEnvelope<T> {
        match self {
            Ok(payload) => ResultEnvelope::ok(payload),
            Err(e) => ResultEnvelope::failure(e.kind(), e.to_string()),
        }
    }
}

/// Renders a service outcome as a JSON envelope with a matching status code
pub fn respond<T: Serialize>(result: AppResult<T>) -> Response {
    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            if matches!(e, AppError::Persistence(_)) {
                tracing::error!("{}", e);
            }
            e.status_code()
        }
    };
    (status, Json(result.into_envelope())).into_response()
}
