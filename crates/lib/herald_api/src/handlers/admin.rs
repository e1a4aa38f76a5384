//! Administrator request handlers.

use axum::extract::State;
use axum::{Extension, Json};
use tracing::info;

use crate::AppState;
use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::middleware::auth::{AuthenticatedAdmin, Bearer};
use crate::models::{
    AdminSignupRequest, AdminSignupResponse, JwtRequest, JwtResponse, ValidityResponse,
};
use crate::services::admin;

/// `POST /admin/getJwt`: exchange login + password for a token.
pub async fn get_jwt_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<JwtRequest>,
) -> AppResult<Json<JwtResponse>> {
    let resp = admin::login(&state.credentials, &state.codec, &body).await?;
    Ok(Json(resp))
}

/// `POST /admin/signup`: create another administrator. Requires an admin token.
pub async fn signup_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedAdmin(caller)): Extension<AuthenticatedAdmin>,
    JsonBody(body): JsonBody<AdminSignupRequest>,
) -> AppResult<Json<AdminSignupResponse>> {
    info!(by = %caller.claims.login, "admin signup requested");
    let resp = admin::signup(&state.credentials, &state.codec, &body).await?;
    Ok(Json(resp))
}

/// `GET /admin/validate`: whether the bearer token is a currently valid admin token.
pub async fn validate_handler(
    State(state): State<AppState>,
    Bearer(identity): Bearer,
) -> AppResult<Json<ValidityResponse>> {
    let resp = admin::validate(&state.gate, &identity).await?;
    Ok(Json(resp))
}
