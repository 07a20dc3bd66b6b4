pub mod generator;
pub mod health;
pub mod item;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                 GET   service liveness payload
/// /health           GET   service + database health
/// /gen              GET   synthetic chunked byte stream
/// /user             GET   NDJSON stream of all users, POST create user
/// /item             POST  create item
/// /item/{id}        PATCH partially update item
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(generator::router())
        .merge(user::router())
        .merge(item::router())
}
