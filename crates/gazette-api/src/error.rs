use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use thiserror::Error;
use tracing::error;

use gazette_types::api::{CommentForm, FieldErrors, FormErrorResponse};

use crate::auth::LOGIN_URL;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Form validation failed; the response carries the bound form and the
    /// per-field messages so the client can redisplay it. Nothing was
    /// persisted.
    #[error("validation failed")]
    Validation {
        form: CommentForm,
        errors: FieldErrors,
    },

    /// Also covers edit/delete attempts on someone else's comment: the row
    /// is outside the requester's visible set, and we do not reveal whether
    /// it exists.
    #[error("not found")]
    NotFound,

    /// Unauthenticated mutation attempt; bounced to the login endpoint.
    #[error("authentication required")]
    LoginRequired,

    #[error("invalid credentials")]
    Unauthorized,

    #[error("conflict: {0}")]
    Conflict(&'static str),

    #[error("bad request: {0}")]
    BadRequest(&'static str),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation { form, errors } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(FormErrorResponse { form, errors }),
            )
                .into_response(),
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::LoginRequired => Redirect::to(LOGIN_URL).into_response(),
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            ApiError::Conflict(_) => StatusCode::CONFLICT.into_response(),
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST.into_response(),
            ApiError::Internal(e) => {
                error!("internal error: {e:#}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
