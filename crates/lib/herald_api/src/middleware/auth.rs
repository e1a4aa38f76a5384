//! Authentication middleware: bearer extraction and the admin gate.
//!
//! [`Bearer`] resolves the request identity (anonymous when no credential is
//! sent). [`require_admin`] additionally runs the composite admin check and is
//! layered over every privileged route, so authorization happens before the
//! body is even parsed.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use herald_core::auth::bearer;
use herald_core::models::auth::Identity;
use tracing::{debug, warn};

use crate::AppState;
use crate::error::AppError;

/// Identity resolved from the request's bearer credential.
#[derive(Debug, Clone)]
pub struct Bearer(pub Identity);

impl FromRequestParts<AppState> for Bearer {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        resolve_identity(&parts.headers, state).map(Bearer)
    }
}

/// An identity that passed the admin gate; stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin(pub Identity);

/// Axum middleware: rejects the request unless it carries a token for a
/// still-valid administrator, then injects `AuthenticatedAdmin`.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = resolve_identity(request.headers(), &state)?;

    if let Err(e) = state.gate.require_admin(&identity).await {
        warn!(login = %identity.claims.login, "not authorized or not an admin: {e}");
        return Err(e.into());
    }

    request.extensions_mut().insert(AuthenticatedAdmin(identity));
    Ok(next.run(request).await)
}

fn resolve_identity(headers: &HeaderMap, state: &AppState) -> Result<Identity, AppError> {
    let header = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    bearer::extract(header, &state.codec).map_err(|e| {
        debug!("bearer token rejected: {e}");
        AppError::from(e)
    })
}
