//! News service. Mutations run behind the admin gate; reading is public.

use herald_core::news::{queries, timestamp};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use super::required;
use crate::error::{AppError, AppResult};
use crate::models::{
    NewsAddRequest, NewsDeleteRequest, NewsEditRequest, NewsEditResponse, NewsEditedResponse,
    NewsListResponse,
};

/// Post ids start at 1; zero or negative means no id was given.
fn post_id(id: Option<i64>) -> Option<i64> {
    id.filter(|id| *id > 0)
}

fn post_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Post {id} was not found"))
}

/// Publish a new post stamped with the current time.
pub async fn add(pool: &SqlitePool, request: &NewsAddRequest) -> AppResult<NewsEditResponse> {
    let (Some(title), Some(content)) = (required(&request.title), required(&request.content))
    else {
        return Err(AppError::Validation(
            "Both a title and content are required for a new post".into(),
        ));
    };

    info!(title, "adding post");
    let id = queries::insert_post(pool, title, content, &timestamp()).await?;

    info!(id, "post added");
    Ok(NewsEditResponse {
        id,
        message: "Post added successfully".into(),
    })
}

/// Remove a post by id.
pub async fn delete(pool: &SqlitePool, request: &NewsDeleteRequest) -> AppResult<NewsEditResponse> {
    let Some(id) = post_id(request.id) else {
        return Err(AppError::Validation("Post id is required".into()));
    };

    info!(id, "deleting post");
    if queries::delete_post(pool, id).await? == 0 {
        return Err(post_not_found(id));
    }

    info!(id, "post deleted");
    Ok(NewsEditResponse {
        id,
        message: "Post deleted successfully".into(),
    })
}

/// Change a post's title and/or content. Absent fields keep their value.
pub async fn edit(pool: &SqlitePool, request: &NewsEditRequest) -> AppResult<NewsEditedResponse> {
    let Some(id) = post_id(request.id) else {
        return Err(AppError::Validation("Post id is required".into()));
    };

    info!(id, "editing post");
    let post = queries::find_post(pool, id)
        .await?
        .ok_or_else(|| post_not_found(id))?;

    let title = match required(&request.new_title) {
        Some(title) => title.to_string(),
        None => {
            warn!(id, "title won't be changed");
            post.title
        }
    };
    let content = match required(&request.new_content) {
        Some(content) => content.to_string(),
        None => {
            warn!(id, "content won't be changed");
            post.content
        }
    };

    debug!(id, "updating post");
    if queries::update_post(pool, id, &title, &content).await? == 0 {
        return Err(post_not_found(id));
    }

    info!(id, "post updated");
    Ok(NewsEditedResponse {
        id,
        title,
        content,
        message: "Post updated successfully".into(),
    })
}

/// Every post, newest first.
pub async fn list(pool: &SqlitePool) -> AppResult<NewsListResponse> {
    let data = queries::list_posts(pool).await?;
    info!(total = data.len(), "news list is ready");
    Ok(NewsListResponse {
        success: true,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn add_edit_delete_cycle() {
        let pool = herald_core::db::memory().await.unwrap();
        let added = add(
            &pool,
            &NewsAddRequest {
                title: Some("Hello".into()),
                content: Some("World".into()),
            },
        )
        .await
        .unwrap();

        let edited = edit(
            &pool,
            &NewsEditRequest {
                id: Some(added.id),
                new_title: None,
                new_content: Some("Everyone".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(edited.title, "Hello");
        assert_eq!(edited.content, "Everyone");

        let listed = list(&pool).await.unwrap();
        assert!(listed.success);
        assert_eq!(listed.data.len(), 1);
        assert_eq!(listed.data[0].content, "Everyone");
        assert!(listed.data[0].date.ends_with("+03:00"));

        delete(&pool, &NewsDeleteRequest { id: Some(added.id) })
            .await
            .unwrap();
        assert!(matches!(
            delete(&pool, &NewsDeleteRequest { id: Some(added.id) }).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn add_requires_title_and_content() {
        let pool = herald_core::db::memory().await.unwrap();
        let err = add(
            &pool,
            &NewsAddRequest {
                title: Some("Hello".into()),
                content: Some(String::new()),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn edit_unknown_post_is_not_found() {
        let pool = herald_core::db::memory().await.unwrap();
        let err = edit(
            &pool,
            &NewsEditRequest {
                id: Some(42),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn zero_or_negative_id_is_a_validation_error() {
        let pool = herald_core::db::memory().await.unwrap();
        for id in [Some(0), Some(-3), None] {
            assert!(matches!(
                delete(&pool, &NewsDeleteRequest { id }).await,
                Err(AppError::Validation(_))
            ));
            assert!(matches!(
                edit(
                    &pool,
                    &NewsEditRequest {
                        id,
                        new_title: Some("t".into()),
                        ..Default::default()
                    },
                )
                .await,
                Err(AppError::Validation(_))
            ));
        }
    }
}
