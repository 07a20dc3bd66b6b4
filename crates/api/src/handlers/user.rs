//! Handlers for the `/user` resource.

use std::error::Error as StdError;
use std::fmt::Display;
use std::io;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use futures::StreamExt;
use itemstore_core::validation::validate_input;
use itemstore_db::models::user::{CreateUser, User};
use itemstore_db::repositories::UserRepo;
use itemstore_db::DbPool;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::AppResult;
use crate::middleware::peer::Peer;
use crate::state::AppState;
use crate::streaming::{ndjson_line, stream_response, StreamGuard, NDJSON_CONTENT_TYPE};

/// Lines buffered between the cursor task and the response body.
const USER_STREAM_BUFFER: usize = 1;

type LineSender = mpsc::Sender<Result<Bytes, io::Error>>;

/// POST /user
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<Json<User>> {
    validate_input(&input)?;
    let user = UserRepo::create(&state.pool, &input).await?;
    tracing::info!(user_id = user.id, login = %user.login, "User created");
    Ok(Json(user))
}

/// GET /user
///
/// Streams every user as NDJSON, ordered by ID. The database cursor runs on
/// its own task and hands lines over a bounded channel; once the client
/// disconnects the channel closes and the task drops the cursor, returning
/// its connection to the pool.
pub async fn stream_all(State(state): State<AppState>, Peer(peer): Peer) -> Response {
    let (tx, rx) = mpsc::channel(USER_STREAM_BUFFER);
    let guard = StreamGuard::start("user", peer);

    tokio::spawn(produce_users(
        state.pool.clone(),
        tx,
        state.config.stream.user_row_delay,
        guard,
    ));

    stream_response(NDJSON_CONTENT_TYPE, Body::from_stream(ReceiverStream::new(rx)))
}

async fn produce_users(pool: DbPool, tx: LineSender, row_delay: Duration, mut guard: StreamGuard) {
    let mut rows = UserRepo::stream_all(&pool);

    while let Some(row) = rows.next().await {
        let user = match row {
            Ok(user) => user,
            Err(err) => return abort(guard, &tx, err).await,
        };
        let line = match ndjson_line(&user) {
            Ok(line) => line,
            Err(err) => return abort(guard, &tx, err).await,
        };

        if !row_delay.is_zero() {
            tokio::select! {
                () = tx.closed() => return,
                () = tokio::time::sleep(row_delay) => {}
            }
        }

        if tx.send(Ok(line)).await.is_err() {
            return;
        }
        guard.record_sent();
    }

    guard.finish();
}

/// Log the failure and push it into the body so the client sees a broken
/// transfer rather than a short but well-formed one.
async fn abort<E>(guard: StreamGuard, tx: &LineSender, err: E)
where
    E: Display + Into<Box<dyn StdError + Send + Sync>>,
{
    guard.fail(&err);
    let _ = tx.send(Err(io::Error::other(err))).await;
}
