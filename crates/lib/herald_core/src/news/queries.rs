//! News-related database queries.

use sqlx::SqlitePool;
use tracing::debug;

use super::{LISTENER, NewsError};
use crate::auth::is_unique_violation;
use crate::models::news::NewsPost;

type PostRow = (i64, String, String, String, String);

fn into_post((id, title, content, date, kind): PostRow) -> NewsPost {
    NewsPost {
        id,
        title,
        content,
        date,
        kind,
    }
}

/// Insert a post, returning its id.
pub async fn insert_post(
    pool: &SqlitePool,
    title: &str,
    content: &str,
    date: &str,
) -> Result<i64, NewsError> {
    let result = sqlx::query("INSERT INTO news (title, content, date, type) VALUES (?1, ?2, ?3, ?4)")
        .bind(title)
        .bind(content)
        .bind(date)
        .bind(LISTENER)
        .execute(pool)
        .await;
    match result {
        Ok(done) => Ok(done.last_insert_rowid()),
        Err(e) if is_unique_violation(&e) => Err(NewsError::Conflict(format!(
            "A post dated {date} already exists"
        ))),
        Err(e) => Err(e.into()),
    }
}

/// Fetch a post by id.
pub async fn find_post(pool: &SqlitePool, id: i64) -> Result<Option<NewsPost>, NewsError> {
    let row = sqlx::query_as::<_, PostRow>(
        "SELECT id, title, content, date, type FROM news WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(into_post))
}

/// Delete a post. Returns the number of rows removed.
pub async fn delete_post(pool: &SqlitePool, id: i64) -> Result<u64, NewsError> {
    let result = sqlx::query("DELETE FROM news WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Overwrite a post's title and content. Returns the number of rows changed.
pub async fn update_post(
    pool: &SqlitePool,
    id: i64,
    title: &str,
    content: &str,
) -> Result<u64, NewsError> {
    let result = sqlx::query("UPDATE news SET title = ?1, content = ?2 WHERE id = ?3")
        .bind(title)
        .bind(content)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// All posts, newest first.
pub async fn list_posts(pool: &SqlitePool) -> Result<Vec<NewsPost>, NewsError> {
    let rows = sqlx::query_as::<_, PostRow>(
        "SELECT id, title, content, date, type FROM news ORDER BY id DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(into_post).collect())
}

/// Rewrite legacy rows: `Z` suffixes become `+03:00` and every post gets the
/// current listener name. Runs in one transaction; returns rows touched.
pub async fn normalize_posts(pool: &SqlitePool) -> Result<u64, NewsError> {
    let mut tx = pool.begin().await?;

    let rows = sqlx::query_as::<_, (i64, String)>("SELECT id, date FROM news")
        .fetch_all(&mut *tx)
        .await?;

    let mut touched = 0;
    for (id, date) in rows {
        let new_date = date.replace('Z', "+03:00");
        sqlx::query("UPDATE news SET date = ?1, type = ?2 WHERE id = ?3")
            .bind(&new_date)
            .bind(LISTENER)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        debug!(id, date = %new_date, "normalized post");
        touched += 1;
    }

    tx.commit().await?;
    Ok(touched)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_edit_list_delete() {
        let pool = crate::db::memory().await.unwrap();
        let first = insert_post(&pool, "One", "first", "2026-01-01T00:00:00.000+03:00")
            .await
            .unwrap();
        let second = insert_post(&pool, "Two", "second", "2026-01-02T00:00:00.000+03:00")
            .await
            .unwrap();

        let posts = list_posts(&pool).await.unwrap();
        assert_eq!(
            posts.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![second, first]
        );
        assert!(posts.iter().all(|p| p.kind == LISTENER));

        assert_eq!(update_post(&pool, first, "Uno", "primero").await.unwrap(), 1);
        let edited = find_post(&pool, first).await.unwrap().unwrap();
        assert_eq!(edited.title, "Uno");
        assert_eq!(edited.content, "primero");

        assert_eq!(delete_post(&pool, first).await.unwrap(), 1);
        assert!(find_post(&pool, first).await.unwrap().is_none());
        assert_eq!(update_post(&pool, first, "x", "y").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn duplicate_date_conflicts() {
        let pool = crate::db::memory().await.unwrap();
        let date = "2026-01-01T00:00:00.000+03:00";
        insert_post(&pool, "One", "first", date).await.unwrap();

        let err = insert_post(&pool, "Two", "second", date).await.unwrap_err();
        assert!(matches!(err, NewsError::Conflict(_)));
    }

    #[tokio::test]
    async fn normalize_rewrites_legacy_rows() {
        let pool = crate::db::memory().await.unwrap();
        sqlx::query("INSERT INTO news (title, content, date, type) VALUES ('t', 'c', '2024-05-01T10:00:00.000Z', 'Telegram')")
            .execute(&pool)
            .await
            .unwrap();

        assert_eq!(normalize_posts(&pool).await.unwrap(), 1);

        let post = &list_posts(&pool).await.unwrap()[0];
        assert_eq!(post.date, "2024-05-01T10:00:00.000+03:00");
        assert_eq!(post.kind, LISTENER);
    }
}
