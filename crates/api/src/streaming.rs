//! Helpers shared by the streaming endpoints.
//!
//! Response bodies are built with [`Body::from_stream`]. When the client goes
//! away hyper drops the body, which drops whatever state the stream owns. A
//! [`StreamGuard`] kept in that state turns the drop into a log line.

use std::fmt::Display;
use std::net::SocketAddr;

use axum::body::{Body, Bytes};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Content type of newline-delimited JSON bodies.
pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

/// Content type of opaque byte stream bodies.
pub const OCTET_STREAM_CONTENT_TYPE: &str = "application/octet-stream";

/// Serialize `value` as one NDJSON line, trailing newline included.
pub fn ndjson_line<T: Serialize>(value: &T) -> Result<Bytes, serde_json::Error> {
    let mut buf = serde_json::to_vec(value)?;
    buf.push(b'\n');
    Ok(Bytes::from(buf))
}

/// Wrap a streaming body in a `200 OK` with the given content type.
pub fn stream_response(content_type: &'static str, body: Body) -> Response {
    ([(header::CONTENT_TYPE, content_type)], body).into_response()
}

/// Tracks one streaming response from first poll to completion or cancel.
///
/// Dropping a guard that was neither [`finish`](Self::finish)ed nor
/// [`fail`](Self::fail)ed means the consumer disappeared mid-stream.
#[derive(Debug)]
pub struct StreamGuard {
    stream: &'static str,
    peer: Option<SocketAddr>,
    sent: u64,
    done: bool,
}

impl StreamGuard {
    pub fn start(stream: &'static str, peer: Option<SocketAddr>) -> Self {
        tracing::info!(stream, ?peer, "Client connected, start streaming");
        Self {
            stream,
            peer,
            sent: 0,
            done: false,
        }
    }

    pub fn record_sent(&mut self) {
        self.sent += 1;
    }

    pub fn sent(&self) -> u64 {
        self.sent
    }

    /// The stream ran to its natural end.
    pub fn finish(mut self) {
        self.done = true;
        tracing::debug!(stream = self.stream, peer = ?self.peer, sent = self.sent, "Stream complete");
    }

    /// The stream was cut short by a server-side error.
    pub fn fail(mut self, error: &dyn Display) {
        self.done = true;
        tracing::error!(
            stream = self.stream,
            peer = ?self.peer,
            sent = self.sent,
            error = %error,
            "Stream aborted"
        );
    }
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        if !self.done {
            tracing::info!(
                stream = self.stream,
                peer = ?self.peer,
                sent = self.sent,
                "Client disconnected, stream cancelled"
            );
        }
    }
}
