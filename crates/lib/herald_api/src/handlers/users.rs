//! User account request handlers.

use axum::Json;
use axum::extract::{Query, State};

use crate::AppState;
use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::models::{
    EditUuidRequest, EditUuidResponse, MessageResponse, UserAuthResponse, UserCredentialsRequest,
    UserDeleteRequest, UserListQuery, UserListResponse, UserRegisterResponse,
};
use crate::services::users;

/// `POST /users/register`
pub async fn register_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UserCredentialsRequest>,
) -> AppResult<Json<UserRegisterResponse>> {
    let resp = users::register(&state.pool, &body).await?;
    Ok(Json(resp))
}

/// `POST /users/auth`
pub async fn auth_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UserCredentialsRequest>,
) -> AppResult<Json<UserAuthResponse>> {
    let resp = users::authenticate(&state.pool, &body).await?;
    Ok(Json(resp))
}

/// `DELETE /users/delete`: requires the service access key.
pub async fn delete_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UserDeleteRequest>,
) -> AppResult<Json<MessageResponse>> {
    let resp = users::delete(&state.pool, state.config.access_key.as_deref(), &body).await?;
    Ok(Json(resp))
}

/// `POST /users/edit_uuid`: requires the service access key.
pub async fn edit_uuid_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<EditUuidRequest>,
) -> AppResult<Json<EditUuidResponse>> {
    let resp = users::edit_uuid(&state.pool, state.config.access_key.as_deref(), &body).await?;
    Ok(Json(resp))
}

/// `GET /users/get_all?accessToken=...`: requires the service access key.
pub async fn list_handler(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> AppResult<Json<UserListResponse>> {
    let resp = users::list(
        &state.pool,
        state.config.access_key.as_deref(),
        query.access_token.as_deref(),
    )
    .await?;
    Ok(Json(resp))
}
