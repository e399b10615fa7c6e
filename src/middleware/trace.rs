//! Per-request tracing.
//!
//! The server opens [`request_span`] before dispatch and calls [`finish`]
//! once the response is ready, so every log line a handler emits is nested
//! under the request that caused it.

use std::net::SocketAddr;
use std::time::Instant;

use tracing::{Span, field, info, info_span};

use crate::response::Response;

pub fn request_span(method: &http::Method, path: &str, peer: SocketAddr) -> Span {
    info_span!(
        "request",
        method = %method,
        path = %path,
        peer = %peer,
        status = field::Empty,
    )
}

/// Records the final status on `span` and logs the latency.
pub fn finish(span: &Span, res: &Response, started: Instant) {
    let status: u16 = res.status_code().into();
    span.record("status", status);
    info!(status, latency_ms = started.elapsed().as_millis() as u64, "request completed");
}
