//! Shared helpers for router integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use herald_api::config::ApiConfig;
use herald_api::{AppState, router};
use herald_core::auth::bootstrap::{BootstrapState, SeedAdmin};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const JWT_SECRET: &str = "integration-secret";
pub const ACCESS_KEY: &str = "service-key";

/// Router over a fresh in-memory database with the default seed admin.
pub async fn test_app() -> (Router, AppState) {
    let pool = herald_core::db::memory()
        .await
        .expect("in-memory database");

    let state = AppState::new(
        pool,
        ApiConfig {
            bind_addr: "127.0.0.1:0".into(),
            database_url: "sqlite::memory:".into(),
            jwt_secret: JWT_SECRET.into(),
            access_key: Some(ACCESS_KEY.into()),
            seed_admin: SeedAdmin::default(),
        },
    );
    assert_eq!(herald_api::bootstrap(&state).await, BootstrapState::Seeded);

    (router(state.clone()), state)
}

/// Send a request with an optional raw `Authorization` header and JSON body.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    authorization: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(AUTHORIZATION, value);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let resp = app
        .clone()
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("response");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// `Authorization` header value for a bearer token.
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Log in as the seed admin and return its token.
pub async fn seed_token(app: &Router) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/admin/getJwt",
        None,
        Some(json!({"Login": "admin", "Password": "admin"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["Jwt"].as_str().expect("Jwt").to_string()
}
