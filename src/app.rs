//! Route table of the service.

use std::sync::Arc;

use crate::health;
use crate::method::Method;
use crate::router::Router;
use crate::summarize::{self, Summarizer};

/// Builds the router: `POST /summarize` plus the health checks, each also
/// answering HEAD.
pub fn router(summarizer: Arc<Summarizer>) -> Router {
    Router::new()
        .post("/summarize", move |req| summarize::handle(Arc::clone(&summarizer), req))
        .get("/healthz", health::liveness)
        .on(Method::Head, "/healthz", health::liveness)
        .get("/readyz", health::readiness)
        .on(Method::Head, "/readyz", health::readiness)
}
