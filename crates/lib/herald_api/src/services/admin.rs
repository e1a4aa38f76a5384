//! Administrator service: token issuance, signup and identity checks.

use herald_core::auth::AuthError;
use herald_core::auth::gate::AuthorizationGate;
use herald_core::auth::jwt::TokenCodec;
use herald_core::auth::password::hash_password;
use herald_core::auth::queries::CredentialStore;
use herald_core::auth::secret::generate_secret_key;
use herald_core::models::auth::{Claims, Identity};
use tracing::{debug, info, warn};

use super::required;
use crate::error::{AppError, AppResult};
use crate::models::{
    AdminSignupRequest, AdminSignupResponse, JwtRequest, JwtResponse, ValidityResponse,
    WhoAmIResponse,
};

/// Issue a token for an administrator's login and password.
pub async fn login(
    store: &CredentialStore,
    codec: &TokenCodec,
    request: &JwtRequest,
) -> AppResult<JwtResponse> {
    let (Some(login), Some(password)) = (required(&request.login), required(&request.password))
    else {
        return Err(AppError::Validation("Login and password are required".into()));
    };

    info!(login, "issuing token");
    let record = store.authenticate(login, password).await.inspect_err(|e| {
        warn!(login, "token request rejected: {e}");
    })?;

    let jwt = codec.issue(&Claims::from(&record))?;
    Ok(JwtResponse {
        login: record.login,
        jwt,
    })
}

/// Create another administrator and hand back its first token.
///
/// The caller must already have passed the admin gate.
pub async fn signup(
    store: &CredentialStore,
    codec: &TokenCodec,
    request: &AdminSignupRequest,
) -> AppResult<AdminSignupResponse> {
    let (Some(login), Some(password), Some(confirm)) = (
        required(&request.login),
        required(&request.password),
        required(&request.confirm_password),
    ) else {
        return Err(AppError::Validation("All fields are required".into()));
    };
    if password != confirm {
        return Err(AppError::Validation("Passwords do not match".into()));
    }

    if store.find_by_login(login).await?.is_some() {
        warn!(login, "administrator already exists");
        return Err(AppError::Conflict(
            "An administrator with this login already exists".into(),
        ));
    }

    debug!(login, "generating secret key");
    let secret_key = generate_secret_key();
    let password_hash = hash_password(password).await?;

    store
        .create(login, &password_hash, &secret_key)
        .await
        .map_err(|e| match e {
            AuthError::Conflict(msg) => AppError::Conflict(msg),
            other => AppError::Internal(format!("admin insert failed: {other}")),
        })?;

    let jwt = codec.issue(&Claims {
        login: login.to_string(),
        secret_key,
    })?;

    info!(login, "administrator registered");
    Ok(AdminSignupResponse {
        login: login.to_string(),
        jwt,
        message: "Administrator registered successfully".into(),
    })
}

/// Whether the identity currently passes the admin gate.
pub async fn validate(gate: &AuthorizationGate, identity: &Identity) -> AppResult<ValidityResponse> {
    let is_valid = gate.is_valid(identity).await?;
    Ok(ValidityResponse { is_valid })
}

/// Describe the request identity. The secret key is never echoed.
pub async fn whoami(gate: &AuthorizationGate, identity: &Identity) -> AppResult<WhoAmIResponse> {
    let is_valid = gate.is_valid(identity).await?;
    Ok(WhoAmIResponse {
        kind: identity.kind.as_str().to_string(),
        login: identity.claims.login.clone(),
        date: identity.issued_at.clone(),
        is_valid,
    })
}
