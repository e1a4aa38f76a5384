//! News post persistence.

pub mod queries;

use chrono::{FixedOffset, Offset, Utc};
use thiserror::Error;

/// Listener name recorded on every post.
pub const LISTENER: &str = "Custom";

/// Offset all post timestamps are expressed in.
const POST_OFFSET_SECS: i32 = 3 * 3600;

/// News store errors.
#[derive(Debug, Error)]
pub enum NewsError {
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),
}

/// Current time as a post timestamp, e.g. `2026-10-17T14:03:11.042+03:00`.
pub fn timestamp() -> String {
    let offset = FixedOffset::east_opt(POST_OFFSET_SECS).unwrap_or_else(|| Utc.fix());
    Utc::now()
        .with_timezone(&offset)
        .format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        .to_string()
}
