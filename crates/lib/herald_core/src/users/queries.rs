//! User-related database queries.

use sqlx::SqlitePool;

use super::UserError;
use crate::auth::is_unique_violation;
use crate::models::users::UserRecord;

/// Fetch a user by login, ignoring case.
pub async fn find_user_by_login(
    pool: &SqlitePool,
    login: &str,
) -> Result<Option<UserRecord>, UserError> {
    let row = sqlx::query_as::<_, (String, String, String, bool, Option<String>)>(
        "SELECT uuid, login, password, is_blocked, block_reason \
         FROM users WHERE lower(login) = lower(?1)",
    )
    .bind(login)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(
        |(uuid, login, password_hash, is_blocked, block_reason)| UserRecord {
            uuid,
            login,
            password_hash,
            is_blocked,
            block_reason,
        },
    ))
}

/// Create a new user. Fails with `Conflict` when the login or uuid is taken.
pub async fn create_user(
    pool: &SqlitePool,
    uuid: &str,
    login: &str,
    password_hash: &str,
) -> Result<(), UserError> {
    sqlx::query("INSERT INTO users (uuid, login, password) VALUES (?1, ?2, ?3)")
        .bind(uuid)
        .bind(login)
        .bind(password_hash)
        .execute(pool)
        .await
        .map_err(|e| conflict_or(e, format!("User '{login}' already exists")))?;
    Ok(())
}

/// Delete a user by login. Returns the number of rows removed.
pub async fn delete_user(pool: &SqlitePool, login: &str) -> Result<u64, UserError> {
    let result = sqlx::query("DELETE FROM users WHERE lower(login) = lower(?1)")
        .bind(login)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Replace a user's uuid. Returns the number of rows changed.
pub async fn update_uuid(pool: &SqlitePool, login: &str, new_uuid: &str) -> Result<u64, UserError> {
    let result = sqlx::query("UPDATE users SET uuid = ?1 WHERE lower(login) = lower(?2)")
        .bind(new_uuid)
        .bind(login)
        .execute(pool)
        .await
        .map_err(|e| conflict_or(e, format!("UUID '{new_uuid}' is already in use")))?;
    Ok(result.rows_affected())
}

/// Block or unblock a user. Returns the number of rows changed.
pub async fn set_blocked(
    pool: &SqlitePool,
    login: &str,
    blocked: bool,
    reason: Option<&str>,
) -> Result<u64, UserError> {
    let result = sqlx::query(
        "UPDATE users SET is_blocked = ?1, block_reason = ?2 WHERE lower(login) = lower(?3)",
    )
    .bind(blocked)
    .bind(reason)
    .bind(login)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// List `(login, uuid)` pairs ordered by login.
pub async fn list_users(pool: &SqlitePool) -> Result<Vec<(String, String)>, UserError> {
    let rows = sqlx::query_as::<_, (String, String)>("SELECT login, uuid FROM users ORDER BY login")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

fn conflict_or(e: sqlx::Error, message: String) -> UserError {
    if is_unique_violation(&e) {
        UserError::Conflict(message)
    } else {
        UserError::DbError(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_find_and_delete() {
        let pool = crate::db::memory().await.unwrap();
        create_user(&pool, "u-1", "Alice", "hash").await.unwrap();

        let user = find_user_by_login(&pool, "alice").await.unwrap().unwrap();
        assert_eq!(user.uuid, "u-1");
        assert_eq!(user.login, "Alice");
        assert!(!user.is_blocked);
        assert_eq!(user.block_reason, None);

        assert_eq!(delete_user(&pool, "ALICE").await.unwrap(), 1);
        assert!(find_user_by_login(&pool, "alice").await.unwrap().is_none());
        assert_eq!(delete_user(&pool, "alice").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn duplicate_login_conflicts() {
        let pool = crate::db::memory().await.unwrap();
        create_user(&pool, "u-1", "alice", "hash").await.unwrap();

        let err = create_user(&pool, "u-2", "ALICE", "hash").await.unwrap_err();
        assert!(matches!(err, UserError::Conflict(_)));
    }

    #[tokio::test]
    async fn uuid_update_conflicts_on_collision() {
        let pool = crate::db::memory().await.unwrap();
        create_user(&pool, "u-1", "alice", "hash").await.unwrap();
        create_user(&pool, "u-2", "bob", "hash").await.unwrap();

        assert_eq!(update_uuid(&pool, "alice", "u-3").await.unwrap(), 1);
        assert!(matches!(
            update_uuid(&pool, "alice", "u-2").await,
            Err(UserError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn list_is_ordered_by_login() {
        let pool = crate::db::memory().await.unwrap();
        create_user(&pool, "u-2", "bob", "hash").await.unwrap();
        create_user(&pool, "u-1", "alice", "hash").await.unwrap();
        set_blocked(&pool, "bob", true, Some("spam")).await.unwrap();

        let users = list_users(&pool).await.unwrap();
        assert_eq!(
            users,
            vec![("alice".into(), "u-1".into()), ("bob".into(), "u-2".into())]
        );
        let bob = find_user_by_login(&pool, "bob").await.unwrap().unwrap();
        assert!(bob.is_blocked);
        assert_eq!(bob.block_reason.as_deref(), Some("spam"));
    }
}
