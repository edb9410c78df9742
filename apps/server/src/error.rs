use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use goaltrack_core::errors::{DatabaseError, Error as CoreError};
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    Auth(#[from] AuthError),
    #[error("{0}")]
    BadRequest(String),
    /// A failure whose details must not reach the caller.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Keeps client-actionable errors as they are and replaces everything
    /// else with `message`, logging the original.
    pub fn redacted(err: CoreError, message: &str) -> Self {
        match err {
            CoreError::Validation(_) | CoreError::Conflict(_) => ApiError::Core(err),
            e if e.is_not_found() => ApiError::Core(e),
            other => {
                tracing::error!("{message}: {other}");
                ApiError::Internal(message.to_string())
            }
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    code: u16,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<&'static str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, error_code) = match self {
            ApiError::Auth(err) => return err.into_response(),
            ApiError::Core(err) => match &err {
                CoreError::Validation(_) => (StatusCode::BAD_REQUEST, err.to_string(), None),
                CoreError::Conflict(conflict) => (
                    StatusCode::BAD_REQUEST,
                    err.to_string(),
                    Some(conflict.code()),
                ),
                CoreError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, err.to_string(), None)
                }
                CoreError::NotFound(_) | CoreError::Database(DatabaseError::NotFound(_)) => {
                    (StatusCode::NOT_FOUND, err.to_string(), None)
                }
                _ => {
                    tracing::error!("Request failed: {err}");
                    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string(), None)
                }
            },
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason, None),
            ApiError::Internal(reason) => (StatusCode::INTERNAL_SERVER_ERROR, reason, None),
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message,
            error_code,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
