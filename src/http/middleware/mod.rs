//! Middleware composition.
//!
//! A middleware is a function from one [`BoxHandler`] to another. The chain
//! composes in onion order: the first middleware registered is outermost,
//! so it sees the request first and the response last.
//!
//! ```text
//! use(A); use(B); wrap(H)   =>   A(B(H))
//!
//!   request ─▶ A ─▶ B ─▶ H
//!  response ◀─ A ◀─ B ◀─ H
//! ```

pub mod request_id;

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::IntoResponse;

use crate::http::handler::BoxHandler;

pub use request_id::request_id;

/// A handler-wrapping function.
pub type Middleware = Arc<dyn Fn(BoxHandler) -> BoxHandler + Send + Sync>;

/// Ordered list of middleware.
///
/// Cloning produces an independent list; pushing onto a clone never affects
/// the original.
#[derive(Clone, Default)]
pub struct MiddlewareChain {
    layers: Vec<Middleware>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a middleware. It becomes the innermost wrapper so far.
    pub fn push(&mut self, middleware: Middleware) {
        self.layers.push(middleware);
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Compose every middleware around `handler`.
    pub fn wrap(&self, handler: BoxHandler) -> BoxHandler {
        self.layers
            .iter()
            .rev()
            .fold(handler, |inner, layer| layer(inner))
    }
}

impl fmt::Debug for MiddlewareChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewareChain")
            .field("layers", &self.layers.len())
            .finish()
    }
}

/// Build a middleware from an async function of the request and the next
/// handler in the chain.
///
/// ```
/// use axum::{body::Body, http::Request};
/// use path_mux::http::{middleware, BoxHandler};
///
/// let log = middleware::from_fn(|req: Request<Body>, next: BoxHandler| async move {
///     tracing::info!(path = %req.uri().path(), "inbound");
///     next.call(req).await
/// });
/// ```
pub fn from_fn<F, Fut, R>(f: F) -> impl Fn(BoxHandler) -> BoxHandler + Send + Sync + 'static
where
    F: Fn(Request<Body>, BoxHandler) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    let f = Arc::new(f);
    move |next: BoxHandler| {
        let f = f.clone();
        BoxHandler::new(move |req: Request<Body>| (*f)(req, next.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recorder(log: Arc<Mutex<Vec<String>>>, name: &'static str) -> Middleware {
        Arc::new(from_fn(move |req: Request<Body>, next: BoxHandler| {
            let log = log.clone();
            async move {
                log.lock().unwrap().push(format!("{name} in"));
                let res = next.call(req).await;
                log.lock().unwrap().push(format!("{name} out"));
                res
            }
        }))
    }

    #[tokio::test]
    async fn test_onion_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut chain = MiddlewareChain::new();
        chain.push(recorder(log.clone(), "A"));
        chain.push(recorder(log.clone(), "B"));

        let handler_log = log.clone();
        let handler = BoxHandler::new(move |_req: Request<Body>| {
            let log = handler_log.clone();
            async move {
                log.lock().unwrap().push("H".to_string());
                "ok"
            }
        });

        chain.wrap(handler).call(Request::new(Body::empty())).await;

        assert_eq!(
            *log.lock().unwrap(),
            vec!["A in", "B in", "H", "B out", "A out"]
        );
    }

    #[test]
    fn test_clone_is_independent() {
        let mut parent = MiddlewareChain::new();
        parent.push(Arc::new(|h: BoxHandler| h));

        let mut child = parent.clone();
        child.push(Arc::new(|h: BoxHandler| h));

        assert_eq!(parent.len(), 1);
        assert_eq!(child.len(), 2);
    }
}
