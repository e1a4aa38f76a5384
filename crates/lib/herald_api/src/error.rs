//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use herald_core::auth::AuthError;
use herald_core::news::NewsError;
use herald_core::users::UserError;
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.as_str()),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m.as_str()),
            AppError::Conflict(m) => (StatusCode::CONFLICT, "conflict", m.as_str()),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "unauthorized", m.as_str()),
            AppError::Forbidden(m) => (StatusCode::FORBIDDEN, "forbidden", m.as_str()),
            AppError::Internal(detail) => {
                error!("internal error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                )
            }
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AppError::NotFound("row not found".into()),
            _ => AppError::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::CredentialError => AppError::Unauthorized("Invalid login or password".into()),
            AuthError::InvalidToken(_) => {
                AppError::Unauthorized("Access denied: invalid or expired token".into())
            }
            AuthError::InvalidKey => AppError::Unauthorized("Token failed validation".into()),
            AuthError::Unauthorized(msg) => AppError::Unauthorized(msg),
            AuthError::ValidationError(msg) => AppError::Validation(msg),
            AuthError::NotFound(msg) => AppError::NotFound(msg),
            AuthError::Conflict(msg) => AppError::Conflict(msg),
            AuthError::DbError(e) => AppError::from(e),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<UserError> for AppError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::Conflict(msg) => AppError::Conflict(msg),
            UserError::DbError(e) => AppError::from(e),
        }
    }
}

impl From<NewsError> for AppError {
    fn from(e: NewsError) -> Self {
        match e {
            NewsError::Conflict(msg) => AppError::Conflict(msg),
            NewsError::DbError(e) => AppError::from(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_map_to_unauthorized() {
        for e in [
            AuthError::CredentialError,
            AuthError::InvalidToken("bad signature".into()),
            AuthError::InvalidKey,
            AuthError::Unauthorized("nope".into()),
        ] {
            let resp = AppError::from(e).into_response();
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn categories_map_to_statuses() {
        let cases = [
            (AppError::from(AuthError::ValidationError("x".into())), StatusCode::BAD_REQUEST),
            (AppError::from(AuthError::NotFound("x".into())), StatusCode::NOT_FOUND),
            (AppError::from(AuthError::Conflict("x".into())), StatusCode::CONFLICT),
            (AppError::from(UserError::Conflict("x".into())), StatusCode::CONFLICT),
            (AppError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (
                AppError::from(AuthError::DbError(sqlx::Error::PoolClosed)),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn token_error_detail_is_not_leaked() {
        let err = AppError::from(AuthError::InvalidToken("InvalidSignature".into()));
        assert!(!err.to_string().contains("InvalidSignature"));
    }
}
