#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{HeaderValue, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use itemstore_api::config::{ServerConfig, StreamConfig};
use itemstore_api::router::build_app_router;
use itemstore_api::state::AppState;
use itemstore_db::models::user::{CreateUser, User};
use itemstore_db::repositories::UserRepo;

/// Build a test `ServerConfig` with safe defaults.
///
/// Streams are short and unthrottled so tests can read them to the end.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        stream: StreamConfig {
            gen_chunk_count: 3,
            gen_chunk_delay: Duration::from_millis(1),
            user_row_delay: Duration::ZERO,
        },
        seed_demo_user: false,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

/// Same as [`build_test_app`] with a caller-supplied configuration.
pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PATCH, uri, Some(body)).await
}

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Body helpers
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Parse an NDJSON body into one value per non-empty line.
pub async fn body_ndjson(response: Response) -> Vec<serde_json::Value> {
    let bytes = body_bytes(response).await;
    std::str::from_utf8(&bytes)
        .unwrap()
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert `count` users with distinct logins directly through the repository.
pub async fn add_some_users(pool: &PgPool, count: usize) -> Vec<User> {
    let mut users = Vec::with_capacity(count);
    for n in 0..count {
        let input = CreateUser {
            id: None,
            name: format!("User {n}"),
            login: format!("login_{n}"),
        };
        users.push(UserRepo::create(pool, &input).await.unwrap());
    }
    users
}
