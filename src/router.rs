//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler.

use std::collections::BTreeMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;

/// Result of matching a method + path against the routing table.
pub(crate) enum Route {
    Found(BoxedHandler),
    /// The path exists, but only under the listed methods.
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Registrations return `self` so they chain.
pub struct Router {
    // BTreeMap keeps the `allow` header in a stable order.
    routes: BTreeMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: BTreeMap::new() }
    }

    /// Register a handler for a method + path pair.
    ///
    /// # Panics
    ///
    /// Panics if `path` conflicts with a route already registered for `method`.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Post, path, handler)
    }

    pub(crate) fn lookup(&self, method: Method, path: &str) -> Route {
        if let Some(matched) = self.routes.get(&method).and_then(|tree| tree.at(path).ok()) {
            return Route::Found(Arc::clone(matched.value));
        }

        let allowed = self.allowed_methods(path);
        if allowed.is_empty() {
            Route::NotFound
        } else {
            Route::MethodNotAllowed(allowed)
        }
    }

    /// Every method with a route matching `path`.
    pub(crate) fn allowed_methods(&self, path: &str) -> Vec<Method> {
        self.routes.iter()
            .filter(|(_, tree)| tree.at(path).is_ok())
            .map(|(method, _)| *method)
            .collect()
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
