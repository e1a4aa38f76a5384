//! # herald_api
//!
//! HTTP API library for Herald.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use herald_core::auth::bootstrap::{BootstrapState, ensure_seed_admin};
use herald_core::auth::gate::AuthorizationGate;
use herald_core::auth::jwt::TokenCodec;
use herald_core::auth::queries::CredentialStore;
use sqlx::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::ApiConfig;
use crate::handlers::{admin, news, system, users};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool.
    pub pool: SqlitePool,
    /// API configuration.
    pub config: ApiConfig,
    /// Token codec bound to the configured signing secret.
    pub codec: Arc<TokenCodec>,
    /// Administrator credentials.
    pub credentials: CredentialStore,
    /// Admin authorization gate over `credentials`.
    pub gate: AuthorizationGate,
}

impl AppState {
    /// Build the state once at startup; every request shares these handles.
    pub fn new(pool: SqlitePool, config: ApiConfig) -> Self {
        let codec = Arc::new(TokenCodec::new(config.jwt_secret.as_bytes()));
        let credentials = CredentialStore::new(pool.clone());
        let gate = AuthorizationGate::new(credentials.clone());
        Self {
            pool,
            config,
            codec,
            credentials,
            gate,
        }
    }
}

/// Run embedded database migrations.
///
/// Delegates to `herald_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    herald_core::migrate::migrate(pool).await
}

/// One-off startup work: seed the bootstrap admin and normalize stored posts.
///
/// Neither step is fatal; failures are logged and the server keeps running.
pub async fn bootstrap(state: &AppState) -> BootstrapState {
    let seeded = ensure_seed_admin(&state.credentials, &state.config.seed_admin).await;

    match herald_core::news::queries::normalize_posts(&state.pool).await {
        Ok(count) => info!(count, "news posts normalized"),
        Err(e) => error!("failed to normalize news posts: {e}"),
    }

    seeded
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no admin gate)
    let public = Router::new()
        .route(routes::GET_PING, get(system::ping_handler))
        .route(routes::GET_WHOAMI, get(system::whoami_handler))
        .route(routes::POST_ADMIN_GET_JWT, post(admin::get_jwt_handler))
        .route(routes::GET_ADMIN_VALIDATE, get(admin::validate_handler))
        .route(routes::POST_USERS_AUTH, post(users::auth_handler))
        .route(routes::POST_USERS_REGISTER, post(users::register_handler))
        .route(routes::DELETE_USERS_DELETE, delete(users::delete_handler))
        .route(routes::POST_USERS_EDIT_UUID, post(users::edit_uuid_handler))
        .route(routes::GET_USERS_GET_ALL, get(users::list_handler))
        .route(routes::GET_NEWS_GET, get(news::list_posts_handler));

    // Protected routes (require a valid admin token)
    let protected = Router::new()
        .route(routes::POST_ADMIN_SIGNUP, post(admin::signup_handler))
        .route(routes::POST_NEWS_ADD, post(news::add_post_handler))
        .route(routes::POST_NEWS_EDIT, post(news::edit_post_handler))
        .route(routes::DELETE_NEWS_DELETE, delete(news::delete_post_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_admin,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
