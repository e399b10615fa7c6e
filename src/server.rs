//! HTTP server and graceful shutdown.
//!
//! On SIGTERM or Ctrl-C the server:
//! 1. Stops calling `listener.accept()`.
//! 2. Asks every open connection to finish its in-flight request and close
//!    (idle keep-alive connections close immediately).
//! 3. Returns from [`Server::serve`] once all connection tasks are done.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{Instrument, debug, error, info};

use crate::error::Error;
use crate::method::Method;
use crate::middleware::{cors, trace};
use crate::request::Request;
use crate::response::Response;
use crate::router::{Route, Router};
use crate::status::Status;

/// The HTTP server.
pub struct Server {
    listener: TcpListener,
    addr: SocketAddr,
}

impl Server {
    /// Binds a listener on `addr`. Port `0` picks a free port; read it back
    /// with [`local_addr`](Server::local_addr).
    pub async fn bind(addr: SocketAddr) -> Result<Self, Error> {
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        Ok(Self { listener, addr })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Serves `router` until SIGTERM or Ctrl-C, then drains connections.
    pub async fn serve(self, router: Router) -> Result<(), Error> {
        self.serve_with_shutdown(router, shutdown_signal()).await
    }

    /// Serves `router` until `signal` resolves, then drains connections.
    pub async fn serve_with_shutdown<F>(self, router: Router, signal: F) -> Result<(), Error>
    where
        F: Future<Output = ()>,
    {
        let Self { listener, addr } = self;
        let router = Arc::new(router);

        // Flipped once on shutdown; every connection task watches it.
        let (draining_tx, draining_rx) = watch::channel(false);
        let mut tasks = tokio::task::JoinSet::new();

        tokio::pin!(signal);
        info!(addr = %addr, "precis listening");

        loop {
            tokio::select! {
                biased;

                () = &mut signal => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, peer) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);
                    let mut draining = draining_rx.clone();
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        let svc = service_fn(move |req| {
                            let router = Arc::clone(&router);
                            async move { dispatch(router, req, peer).await }
                        });

                        let builder = ConnBuilder::new(TokioExecutor::new());
                        let conn = builder.serve_connection(io, svc);
                        tokio::pin!(conn);

                        let res = tokio::select! {
                            res = conn.as_mut() => res,
                            _ = draining.changed() => {
                                conn.as_mut().graceful_shutdown();
                                conn.await
                            }
                        };
                        if let Err(e) = res {
                            error!(peer = %peer, "connection error: {e}");
                        }
                    });
                }

                Some(res) = tasks.join_next(), if !tasks.is_empty() => reap(res),
            }
        }

        // Receivers also wake if the sender is dropped, so ignoring a send
        // error here is fine.
        let _ = draining_tx.send(true);
        while let Some(res) = tasks.join_next().await {
            reap(res);
        }

        info!("precis stopped");
        Ok(())
    }
}

/// Logs a connection task that panicked or was aborted.
fn reap(res: Result<(), tokio::task::JoinError>) {
    if let Err(e) = res {
        error!("connection task failed: {e}");
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Routes one request and produces one response. Failures become responses
/// (400, 404, 405, ...), so hyper never sees an error.
async fn dispatch(
    router: Arc<Router>,
    req: hyper::Request<Incoming>,
    peer: SocketAddr,
) -> Result<http::Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let span = trace::request_span(req.method(), req.uri().path(), peer);

    async move {
        let mut response = respond(&router, req).await;
        cors::apply(&mut response);
        trace::finish(&tracing::Span::current(), &response, started);
        Ok(response.into_inner())
    }
    .instrument(span)
    .await
}

async fn respond(router: &Router, req: hyper::Request<Incoming>) -> Response {
    let (parts, body) = req.into_parts();
    let path = parts.uri.path().to_owned();

    let Ok(method) = Method::try_from(&parts.method) else {
        return method_not_allowed(&router.allowed_methods(&path));
    };

    if cors::is_preflight(method, &parts.headers) {
        return cors::preflight(&parts.headers);
    }

    let handler = match router.lookup(method, &path) {
        Route::Found(handler) => handler,
        Route::MethodNotAllowed(allowed) => return method_not_allowed(&allowed),
        Route::NotFound => return Response::status(Status::NotFound),
    };

    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            debug!("failed to read request body: {e}");
            return Response::status(Status::BadRequest);
        }
    };

    handler.call(Request::new(parts.headers, body)).await
}

fn method_not_allowed(allowed: &[Method]) -> Response {
    let allow = allowed.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ");
    Response::builder()
        .status(Status::MethodNotAllowed)
        .header("allow", &allow)
        .no_body()
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on SIGTERM (Unix) or Ctrl-C.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
