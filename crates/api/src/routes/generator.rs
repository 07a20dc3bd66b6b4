use axum::routing::get;
use axum::Router;

use crate::handlers::generator;
use crate::state::AppState;

/// ```text
/// GET /gen -> stream_chunks
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/gen", get(generator::stream_chunks))
}
