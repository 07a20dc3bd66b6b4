//! Handler for the synthetic `/gen` byte stream.

use std::convert::Infallible;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::response::Response;
use futures::stream;

use crate::config::StreamConfig;
use crate::middleware::peer::Peer;
use crate::state::AppState;
use crate::streaming::{stream_response, StreamGuard, OCTET_STREAM_CONTENT_TYPE};

/// Payload of every chunk.
pub const CHUNK: &[u8] = b"some chunk";

/// GET /gen
///
/// Emits `gen_chunk_count` copies of [`CHUNK`], sleeping `gen_chunk_delay`
/// before each one. Nothing is produced ahead of the client: the next sleep
/// starts only when hyper polls for the next frame.
pub async fn stream_chunks(State(state): State<AppState>, Peer(peer): Peer) -> Response {
    let StreamConfig {
        gen_chunk_count,
        gen_chunk_delay,
        ..
    } = state.config.stream;

    let guard = StreamGuard::start("gen", peer);
    let chunks = stream::unfold(guard, move |mut guard| async move {
        if guard.sent() >= gen_chunk_count {
            guard.finish();
            return None;
        }
        tokio::time::sleep(gen_chunk_delay).await;
        guard.record_sent();
        Some((Ok::<_, Infallible>(Bytes::from_static(CHUNK)), guard))
    });

    stream_response(OCTET_STREAM_CONTENT_TYPE, Body::from_stream(chunks))
}
