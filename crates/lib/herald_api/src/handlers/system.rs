//! Service-level endpoints.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::Bearer;
use crate::models::{MessageResponse, WhoAmIResponse};
use crate::services::admin;

/// `GET /ping`: liveness check.
pub async fn ping_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Pong OwO!".into(),
    })
}

/// `GET /whoami`: describe the identity behind the bearer token.
pub async fn whoami_handler(
    State(state): State<AppState>,
    Bearer(identity): Bearer,
) -> AppResult<Json<WhoAmIResponse>> {
    let resp = admin::whoami(&state.gate, &identity).await?;
    Ok(Json(resp))
}
