//! The request handler capability.
//!
//! Everything the router dispatches to, including its own default responses
//! and every middleware-wrapped chain, is a [`Handler`]: given a request it
//! produces a response future.
//!
//! Async closures get a blanket implementation, so plain functions work:
//!
//! ```
//! use axum::{body::Body, http::Request};
//! use path_mux::http::BoxHandler;
//!
//! let hello = BoxHandler::new(|_req: Request<Body>| async { "hello" });
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;

/// A unit of request handling.
pub trait Handler: Send + Sync + 'static {
    /// Serve one request.
    fn call(&self, req: Request<Body>) -> BoxFuture<'static, Response>;
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    fn call(&self, req: Request<Body>) -> BoxFuture<'static, Response> {
        let fut = self(req);
        Box::pin(async move { fut.await.into_response() })
    }
}

/// Type-erased, cheaply clonable handler.
#[derive(Clone)]
pub struct BoxHandler(Arc<dyn Handler>);

impl BoxHandler {
    pub fn new<H: Handler>(handler: H) -> Self {
        Self(Arc::new(handler))
    }

    /// Serve one request through the wrapped handler.
    pub fn call(&self, req: Request<Body>) -> BoxFuture<'static, Response> {
        self.0.call(req)
    }
}

impl Handler for BoxHandler {
    fn call(&self, req: Request<Body>) -> BoxFuture<'static, Response> {
        self.0.call(req)
    }
}

impl fmt::Debug for BoxHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BoxHandler")
    }
}
