//! Administrator credential store backed by the `admins` table.
//!
//! Logins are matched case-insensitively. Uniqueness is enforced by the
//! `lower(login)` unique index; lookups before inserts are only a fast path
//! for a friendlier message.

use sqlx::SqlitePool;
use tracing::debug;

use super::{AuthError, is_unique_violation, password};
use crate::models::auth::AdminRecord;

/// Single source of truth for administrator credentials.
#[derive(Clone, Debug)]
pub struct CredentialStore {
    pub(crate) pool: SqlitePool,
}

impl CredentialStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch an administrator by login, ignoring case.
    pub async fn find_by_login(&self, login: &str) -> Result<Option<AdminRecord>, AuthError> {
        let row = sqlx::query_as::<_, (String, String, String)>(
            "SELECT login, password, secret_key FROM admins WHERE lower(login) = lower(?1)",
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(login, password_hash, secret_key)| AdminRecord {
            login,
            password_hash,
            secret_key,
        }))
    }

    /// Insert a new administrator. Fails with `Conflict` when the login is taken.
    pub async fn create(
        &self,
        login: &str,
        password_hash: &str,
        secret_key: &str,
    ) -> Result<(), AuthError> {
        let result = sqlx::query("INSERT INTO admins (login, password, secret_key) VALUES (?1, ?2, ?3)")
            .bind(login)
            .bind(password_hash)
            .bind(secret_key)
            .execute(&self.pool)
            .await;
        match result {
            Ok(_) => {
                debug!(login, "admin record inserted");
                Ok(())
            }
            Err(e) if is_unique_violation(&e) => Err(AuthError::Conflict(format!(
                "Administrator '{login}' already exists"
            ))),
            Err(e) => Err(e.into()),
        }
    }

    /// True iff `login` exists and its stored secret equals `candidate` exactly.
    pub async fn secret_matches(&self, login: &str, candidate: &str) -> Result<bool, AuthError> {
        let record = self.find_by_login(login).await?;
        Ok(record.is_some_and(|r| r.secret_key == candidate))
    }

    /// Check a password for `login`. Fails with `NotFound` for an unknown login.
    pub async fn verify_password(&self, login: &str, candidate: &str) -> Result<bool, AuthError> {
        match self.authenticate(login, candidate).await {
            Ok(_) => Ok(true),
            Err(AuthError::CredentialError) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Look up `login` and verify `candidate` against its hash.
    pub async fn authenticate(
        &self,
        login: &str,
        candidate: &str,
    ) -> Result<AdminRecord, AuthError> {
        let record = self
            .find_by_login(login)
            .await?
            .ok_or_else(|| AuthError::NotFound(format!("Administrator '{login}' not found")))?;
        if !password::verify_password(candidate, &record.password_hash).await? {
            return Err(AuthError::CredentialError);
        }
        Ok(record)
    }

    /// Replace the stored secret for `login`. Returns whether a row changed.
    ///
    /// Every token issued with the old secret stops passing the gate.
    pub async fn rotate_secret(&self, login: &str, new_secret: &str) -> Result<bool, AuthError> {
        let result = sqlx::query("UPDATE admins SET secret_key = ?1 WHERE lower(login) = lower(?2)")
            .bind(new_secret)
            .bind(login)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
