use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// ```text
/// GET  /user -> stream_all
/// POST /user -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/user", get(user::stream_all).post(user::create))
}
