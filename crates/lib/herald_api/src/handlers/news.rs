//! News request handlers.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::models::{
    NewsAddRequest, NewsDeleteRequest, NewsEditRequest, NewsEditResponse, NewsEditedResponse,
    NewsListResponse,
};
use crate::services::news;

/// `POST /news/add`: admin only.
pub async fn add_post_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewsAddRequest>,
) -> AppResult<Json<NewsEditResponse>> {
    let resp = news::add(&state.pool, &body).await?;
    Ok(Json(resp))
}

/// `DELETE /news/delete`: admin only.
pub async fn delete_post_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewsDeleteRequest>,
) -> AppResult<Json<NewsEditResponse>> {
    let resp = news::delete(&state.pool, &body).await?;
    Ok(Json(resp))
}

/// `POST /news/edit`: admin only.
pub async fn edit_post_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewsEditRequest>,
) -> AppResult<Json<NewsEditedResponse>> {
    let resp = news::edit(&state.pool, &body).await?;
    Ok(Json(resp))
}

/// `GET /news/get`: public.
pub async fn list_posts_handler(
    State(state): State<AppState>,
) -> AppResult<Json<NewsListResponse>> {
    let resp = news::list(&state.pool).await?;
    Ok(Json(resp))
}
