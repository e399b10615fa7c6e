//! Health-check handlers.
//!
//! | Check | Path | Answer |
//! |---|---|---|
//! | liveness | `/healthz` | the process can serve HTTP |
//! | readiness | `/readyz` | the process accepts summarize traffic |
//!
//! Readiness does not call the provider: a health check must not spend API quota.

use crate::{Request, Response};

pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

pub async fn readiness(_req: Request) -> Response {
    Response::text("ready")
}
