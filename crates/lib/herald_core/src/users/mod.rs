//! User account persistence.

pub mod queries;

use thiserror::Error;
use uuid::Uuid;

/// User store errors.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),
}

/// Generate a uuid for a newly registered user.
pub fn new_user_uuid() -> String {
    Uuid::new_v4().to_string()
}
