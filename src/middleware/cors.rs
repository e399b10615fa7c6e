//! Permissive CORS.
//!
//! Any origin may call any route. Every response gets
//! `access-control-allow-origin: *`, and preflight requests are answered
//! before routing so they never reach a handler.

use http::HeaderMap;

use crate::method::Method;
use crate::response::Response;
use crate::status::Status;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, HEAD, POST, OPTIONS, PUT, PATCH, DELETE";
pub const MAX_AGE_SECS: u32 = 86_400;

const REQUEST_METHOD: &str = "access-control-request-method";
const REQUEST_HEADERS: &str = "access-control-request-headers";

/// A preflight is an `OPTIONS` request announcing the method it intends to use.
pub fn is_preflight(method: Method, headers: &HeaderMap) -> bool {
    method == Method::Options && headers.contains_key(REQUEST_METHOD)
}

/// Answers a preflight with `204 No Content`, echoing any requested headers.
pub fn preflight(headers: &HeaderMap) -> Response {
    let mut builder = Response::builder()
        .status(Status::NoContent)
        .header("access-control-allow-methods", ALLOW_METHODS)
        .header("access-control-max-age", &MAX_AGE_SECS.to_string());

    if let Some(requested) = headers.get(REQUEST_HEADERS).and_then(|v| v.to_str().ok()) {
        builder = builder.header("access-control-allow-headers", requested);
    }
    builder.no_body()
}

/// Adds the allow-origin header to an outgoing response.
pub fn apply(res: &mut Response) {
    res.set_header("access-control-allow-origin", ALLOW_ORIGIN);
}
