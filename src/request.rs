//! Incoming HTTP request type.

use bytes::Bytes;
use http::HeaderMap;
use serde::de::DeserializeOwned;

/// An incoming HTTP request with its body fully buffered.
///
/// Routing has already happened by the time a handler sees it, so only the
/// headers and body are kept.
pub struct Request {
    headers: HeaderMap,
    body: Bytes,
}

impl Request {
    pub(crate) fn new(headers: HeaderMap, body: Bytes) -> Self {
        Self { headers, body }
    }

    /// Case-insensitive header lookup. Values that are not visible ASCII are
    /// treated as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Deserializes the body as JSON. The content-type header is not checked.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}
