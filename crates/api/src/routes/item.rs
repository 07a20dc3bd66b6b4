use axum::routing::{patch, post};
use axum::Router;

use crate::handlers::item;
use crate::state::AppState;

/// ```text
/// POST  /item      -> create
/// PATCH /item/{id} -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/item", post(item::create))
        .route("/item/{id}", patch(item::update))
}
