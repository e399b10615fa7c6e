//! Middleware layer.
//!
//! Cross-cutting concerns applied by the server around every dispatch:
//!
//! - [`cors`]: permissive cross-origin headers and preflight answers
//! - [`trace`]: per-request span with method, path, status, latency

pub mod cors;
pub mod trace;
