//! Password hashing via bcrypt.
//!
//! Surrounding whitespace is not part of a password: it is trimmed both when
//! hashing and when verifying. bcrypt runs on the blocking pool so request
//! tasks keep making progress while a hash is computed.

use tokio::task::spawn_blocking;

use super::AuthError;

/// bcrypt cost factor.
const BCRYPT_COST: u32 = 10;

/// Hash a password with bcrypt (cost 10).
pub async fn hash_password(password: &str) -> Result<String, AuthError> {
    let password = password.trim().to_owned();
    spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|e| AuthError::Internal(format!("bcrypt hash task failed: {e}")))?
        .map_err(|e| AuthError::Internal(format!("bcrypt hash: {e}")))
}

/// Verify a password against a bcrypt hash.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let password = password.trim().to_owned();
    let hash = hash.to_owned();
    spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AuthError::Internal(format!("bcrypt verify task failed: {e}")))?
        .map_err(|e| AuthError::Internal(format!("bcrypt verify: {e}")))
}
