//! User account service.
//!
//! Registration and sign-in are public. Deleting users, replacing uuids and
//! listing accounts require the process-wide service access key instead of an
//! admin token.

use herald_core::auth::password::{hash_password, verify_password};
use herald_core::users::{new_user_uuid, queries};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use super::required;
use crate::error::{AppError, AppResult};
use crate::models::{
    EditUuidRequest, EditUuidResponse, MessageResponse, UserAuthResponse, UserCredentialsRequest,
    UserDeleteRequest, UserListResponse, UserRegisterResponse,
};

/// Check a supplied service access key against the configured one.
fn check_access(expected: Option<&str>, supplied: Option<&str>) -> AppResult<()> {
    let Some(supplied) = supplied.filter(|s| !s.is_empty()) else {
        return Err(AppError::Unauthorized("Access key is required".into()));
    };
    match expected {
        Some(expected) if expected == supplied => Ok(()),
        _ => {
            warn!("invalid service access key");
            Err(AppError::Unauthorized("Access denied: wrong access key".into()))
        }
    }
}

fn credentials(request: &UserCredentialsRequest) -> AppResult<(&str, &str)> {
    match (required(&request.login), required(&request.password)) {
        (Some(login), Some(password)) => Ok((login, password)),
        _ => Err(AppError::Validation("Login and password are required".into())),
    }
}

/// Register a new user account.
pub async fn register(
    pool: &SqlitePool,
    request: &UserCredentialsRequest,
) -> AppResult<UserRegisterResponse> {
    let (login, password) = credentials(request)?;
    info!(login, "registering user");

    if queries::find_user_by_login(pool, login).await?.is_some() {
        warn!(login, "user already exists");
        return Err(AppError::Conflict(
            "A user with this login already exists".into(),
        ));
    }

    let uuid = new_user_uuid();
    let password_hash = hash_password(password).await?;
    queries::create_user(pool, &uuid, login, &password_hash).await?;

    info!(login, "user registered");
    Ok(UserRegisterResponse {
        login: login.to_string(),
        message: "User registered successfully".into(),
    })
}

/// Sign a user in with login and password.
pub async fn authenticate(
    pool: &SqlitePool,
    request: &UserCredentialsRequest,
) -> AppResult<UserAuthResponse> {
    let (login, password) = credentials(request)?;
    info!(login, "authorizing user");

    let user = queries::find_user_by_login(pool, login)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    if user.is_blocked {
        let reason = user.block_reason.as_deref().unwrap_or("not specified");
        warn!(login, reason, "blocked user tried to sign in");
        return Err(AppError::Forbidden(format!("User is blocked. Reason: {reason}")));
    }

    if !verify_password(password, &user.password_hash).await? {
        warn!(login, "incorrect login or password");
        return Err(AppError::Unauthorized("Invalid login or password".into()));
    }

    info!(login, "user authorized");
    Ok(UserAuthResponse {
        login: user.login,
        user_uuid: user.uuid,
        message: "Authorized successfully".into(),
    })
}

/// Delete a user by login.
pub async fn delete(
    pool: &SqlitePool,
    access_key: Option<&str>,
    request: &UserDeleteRequest,
) -> AppResult<MessageResponse> {
    let Some(login) = required(&request.login) else {
        return Err(AppError::Validation("Login is required".into()));
    };
    check_access(access_key, request.access_token.as_deref())?;

    info!(login, "deleting user");
    if queries::delete_user(pool, login).await? == 0 {
        return Err(AppError::NotFound("User not found".into()));
    }

    info!(login, "user deleted");
    Ok(MessageResponse {
        message: "User deleted successfully".into(),
    })
}

/// Replace a user's uuid with a caller-chosen one.
pub async fn edit_uuid(
    pool: &SqlitePool,
    access_key: Option<&str>,
    request: &EditUuidRequest,
) -> AppResult<EditUuidResponse> {
    check_access(access_key, request.access_token.as_deref())?;
    let Some(login) = required(&request.login) else {
        return Err(AppError::Validation("Login is required".into()));
    };

    let user = queries::find_user_by_login(pool, login)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let Some(new_uuid) = required(&request.new_uuid) else {
        return Err(AppError::Validation("New UUID is required".into()));
    };

    debug!(login, new_uuid, "updating uuid");
    if queries::update_uuid(pool, login, new_uuid).await? == 0 {
        return Err(AppError::Internal(format!("uuid update for {login} changed no rows")));
    }

    info!(login, new_uuid, "uuid updated");
    Ok(EditUuidResponse {
        login: user.login,
        old_uuid: user.uuid,
        new_uuid: new_uuid.to_string(),
        message: "User UUID updated successfully".into(),
    })
}

/// List every user as `"login: uuid"`.
pub async fn list(
    pool: &SqlitePool,
    access_key: Option<&str>,
    supplied_key: Option<&str>,
) -> AppResult<UserListResponse> {
    check_access(access_key, supplied_key)?;

    let logins: Vec<String> = queries::list_users(pool)
        .await?
        .into_iter()
        .map(|(login, uuid)| format!("{login}: {uuid}"))
        .collect();

    let message = if logins.is_empty() {
        "User list is empty".to_string()
    } else {
        format!("Found {} users", logins.len())
    };
    info!(total = logins.len(), "user list is ready");
    Ok(UserListResponse { logins, message })
}
