//! Administrator authentication and authorization.
//!
//! A token is cryptographically valid forever; it is *authoritatively* valid
//! only while the secret key it embeds still matches the `admins` row for its
//! login. [`gate::AuthorizationGate`] performs that cross-check.

pub mod bearer;
pub mod bootstrap;
pub mod gate;
pub mod jwt;
pub mod password;
pub mod queries;
pub mod secret;

use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid login or password")]
    CredentialError,

    #[error("Invalid or expired token: {0}")]
    InvalidToken(String),

    #[error("Secret key is not valid")]
    InvalidKey,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// True when a sqlx error is a violated unique constraint.
pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}
