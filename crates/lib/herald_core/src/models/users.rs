//! User account models.

use serde::{Deserialize, Serialize};

/// Row from the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub uuid: String,
    pub login: String,
    pub password_hash: String,
    pub is_blocked: bool,
    pub block_reason: Option<String>,
}
