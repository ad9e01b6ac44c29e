//! Route registration and dispatch.
//!
//! # Responsibilities
//! - Compile patterns and store one route per method
//! - Scan routes in registration order and dispatch the first exact match
//! - Fall back to 405 (with `Allow`), automatic OPTIONS, or 404
//! - Compose middleware around handlers
//!
//! # Design Decisions
//! - First registered route wins among overlapping patterns
//! - Route table is an append-only snapshot behind `ArcSwap`, shared with
//!   every group derived from the router
//! - Middleware is applied when a route is registered, so later `use`
//!   calls never change existing routes
//! - Groups get their own copy of the middleware list

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;
use std::task::{Context, Poll};

use arc_swap::ArcSwap;
use axum::body::Body;
use axum::http::{header, HeaderValue, Method, Request};
use axum::response::Response;
use futures_util::future::BoxFuture;
use tower::Service;

use crate::http::handler::{BoxHandler, Handler};
use crate::http::middleware::{Middleware, MiddlewareChain};
use crate::http::response;
use crate::observability::metrics::{self, Outcome};
use crate::routing::error::{RouteError, RouteResult};
use crate::routing::matcher::{decode_path, split_path, Matcher};
use crate::routing::params::Params;
use crate::routing::pattern::{Pattern, RegexCache};

/// Methods a route is registered for when none are given.
pub const ALL_METHODS: [Method; 8] = [
    Method::DELETE,
    Method::GET,
    Method::HEAD,
    Method::OPTIONS,
    Method::PATCH,
    Method::POST,
    Method::PUT,
    Method::TRACE,
];

/// One compiled pattern bound to one method and one wrapped handler.
#[derive(Debug)]
pub struct Route {
    method: Method,
    pattern: Pattern,
    handler: BoxHandler,
}

impl Route {
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The pattern text this route was registered with.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn is_wildcard(&self) -> bool {
        self.pattern.is_wildcard()
    }

    fn match_path(&self, path: &[&str]) -> Option<Params> {
        self.pattern.match_path(path)
    }
}

/// Insertion-ordered routes shared by a router and its groups.
#[derive(Clone)]
pub struct RouteTable {
    routes: Arc<ArcSwap<Vec<Arc<Route>>>>,
}

impl RouteTable {
    fn new() -> Self {
        Self {
            routes: Arc::new(ArcSwap::from_pointee(Vec::new())),
        }
    }

    fn extend(&self, added: Vec<Route>) {
        let added: Vec<Arc<Route>> = added.into_iter().map(Arc::new).collect();
        self.routes.rcu(|current| {
            let mut next = (**current).clone();
            next.extend(added.iter().cloned());
            next
        });
    }

    /// Current routes, in registration order.
    pub fn snapshot(&self) -> Arc<Vec<Arc<Route>>> {
        self.routes.load_full()
    }

    pub fn len(&self) -> usize {
        self.routes.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.load().is_empty()
    }
}

/// Path and method request router.
///
/// ```
/// use axum::{body::Body, http::Request};
/// use path_mux::routing::{RequestParamsExt, Router};
///
/// # fn main() -> Result<(), path_mux::routing::RouteError> {
/// let router = Router::new();
/// router.get("/users/:id|[0-9]+", |req: Request<Body>| async move {
///     format!("user {}", req.param("id"))
/// })?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Router {
    routes: RouteTable,
    regex_cache: RegexCache,
    not_found: BoxHandler,
    method_not_allowed: BoxHandler,
    options: BoxHandler,
    middleware: MiddlewareChain,
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: RouteTable::new(),
            regex_cache: RegexCache::new(),
            not_found: response::not_found(),
            method_not_allowed: response::method_not_allowed(),
            options: response::options(),
            middleware: MiddlewareChain::new(),
        }
    }

    /// Handler for requests whose path matches no route.
    pub fn set_not_found<H: Handler>(&mut self, handler: H) {
        self.not_found = BoxHandler::new(handler);
    }

    /// Handler for requests whose path matches but method does not.
    pub fn set_method_not_allowed<H: Handler>(&mut self, handler: H) {
        self.method_not_allowed = BoxHandler::new(handler);
    }

    /// Handler for OPTIONS requests no route claims explicitly.
    pub fn set_options<H: Handler>(&mut self, handler: H) {
        self.options = BoxHandler::new(handler);
    }

    /// Append a middleware. It wraps routes registered from now on, and the
    /// default handlers.
    pub fn use_middleware<M>(&mut self, middleware: M)
    where
        M: Fn(BoxHandler) -> BoxHandler + Send + Sync + 'static,
    {
        self.middleware.push(Arc::new(middleware));
    }

    /// Append several middleware, outermost first.
    pub fn use_middlewares<I>(&mut self, middleware: I)
    where
        I: IntoIterator<Item = Middleware>,
    {
        for layer in middleware {
            self.middleware.push(layer);
        }
    }

    /// Compose the current middleware around `handler`.
    pub fn wrap(&self, handler: BoxHandler) -> BoxHandler {
        self.middleware.wrap(handler)
    }

    /// Run `f` against a copy of this router that shares its routes but owns
    /// its middleware list.
    ///
    /// Registration methods take `&self`: the route table is shared, so a
    /// route added through any copy is visible to all of them. Middleware and
    /// default handlers belong to one copy and need `&mut self`.
    pub fn group<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Router) -> R,
    {
        let mut group = self.clone();
        f(&mut group)
    }

    /// Register `handler` for `pattern` under each of `methods`, or under
    /// every method if `methods` is empty.
    ///
    /// A list containing GET but not HEAD gets GET appended a second time.
    /// The extra route is shadowed by the first and changes nothing at
    /// dispatch.
    pub fn handle<H: Handler>(&self, pattern: &str, handler: H, methods: &[&str]) -> RouteResult<()> {
        let mut methods = if methods.is_empty() {
            ALL_METHODS.to_vec()
        } else {
            methods
                .iter()
                .map(|m| parse_method(m))
                .collect::<RouteResult<Vec<_>>>()?
        };
        if methods.contains(&Method::GET) && !methods.contains(&Method::HEAD) {
            methods.push(Method::GET);
        }

        let pattern = Pattern::compile(pattern, &self.regex_cache)?;
        let handler = self.wrap(BoxHandler::new(handler));

        let routes: Vec<Route> = methods
            .into_iter()
            .map(|method| {
                tracing::debug!(method = %method, pattern = pattern.as_str(), "Registered route");
                Route {
                    method,
                    pattern: pattern.clone(),
                    handler: handler.clone(),
                }
            })
            .collect();
        self.routes.extend(routes);
        Ok(())
    }

    /// Register for every method.
    pub fn any<H: Handler>(&self, pattern: &str, handler: H) -> RouteResult<()> {
        self.handle(pattern, handler, &[])
    }

    pub fn get<H: Handler>(&self, pattern: &str, handler: H) -> RouteResult<()> {
        self.handle(pattern, handler, &["GET"])
    }

    pub fn head<H: Handler>(&self, pattern: &str, handler: H) -> RouteResult<()> {
        self.handle(pattern, handler, &["HEAD"])
    }

    pub fn post<H: Handler>(&self, pattern: &str, handler: H) -> RouteResult<()> {
        self.handle(pattern, handler, &["POST"])
    }

    pub fn put<H: Handler>(&self, pattern: &str, handler: H) -> RouteResult<()> {
        self.handle(pattern, handler, &["PUT"])
    }

    pub fn patch<H: Handler>(&self, pattern: &str, handler: H) -> RouteResult<()> {
        self.handle(pattern, handler, &["PATCH"])
    }

    pub fn delete<H: Handler>(&self, pattern: &str, handler: H) -> RouteResult<()> {
        self.handle(pattern, handler, &["DELETE"])
    }

    pub fn options<H: Handler>(&self, pattern: &str, handler: H) -> RouteResult<()> {
        self.handle(pattern, handler, &["OPTIONS"])
    }

    pub fn trace<H: Handler>(&self, pattern: &str, handler: H) -> RouteResult<()> {
        self.handle(pattern, handler, &["TRACE"])
    }

    /// The shared route table.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// The regex cache shared by this router and its groups.
    pub fn regex_cache(&self) -> &RegexCache {
        &self.regex_cache
    }

    /// Resolve `req` to exactly one handler and run it. Matching sees the
    /// percent-decoded path.
    pub fn dispatch(&self, mut req: Request<Body>) -> BoxFuture<'static, Response> {
        let path = decode_path(req.uri().path()).into_owned();
        let segments = split_path(&path);
        let mut allowed: Vec<Method> = Vec::new();

        let routes = self.routes.routes.load();
        for route in routes.iter() {
            let Some(params) = route.match_path(&segments) else {
                continue;
            };

            if route.method == *req.method() {
                tracing::debug!(
                    method = %route.method,
                    path = %path,
                    pattern = route.pattern(),
                    "Route matched"
                );
                metrics::record_dispatch(Outcome::Matched);
                params.attach(&mut req);
                return route.handler.call(req);
            }

            if !allowed.contains(&route.method) {
                allowed.push(route.method.clone());
            }
        }

        if allowed.is_empty() {
            tracing::debug!(method = %req.method(), path = %path, "No route matched");
            metrics::record_dispatch(Outcome::NotFound);
            return self.wrap(self.not_found.clone()).call(req);
        }

        let allow = allowed
            .iter()
            .map(Method::as_str)
            .chain(std::iter::once(Method::OPTIONS.as_str()))
            .collect::<Vec<_>>()
            .join(",");

        let (outcome, handler) = if *req.method() == Method::OPTIONS {
            (Outcome::Options, &self.options)
        } else {
            (Outcome::MethodNotAllowed, &self.method_not_allowed)
        };
        tracing::debug!(
            method = %req.method(),
            path = %path,
            allow = %allow,
            outcome = outcome.as_str(),
            "Path matched without method"
        );
        metrics::record_dispatch(outcome);

        let allow = HeaderValue::from_str(&allow).ok();
        let fut = self.wrap(handler.clone()).call(req);
        Box::pin(async move {
            let mut res = fut.await;
            if let Some(allow) = allow {
                res.headers_mut().entry(header::ALLOW).or_insert(allow);
            }
            res
        })
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes.len())
            .field("middleware", &self.middleware)
            .finish()
    }
}

/// A router can itself be mounted as a handler, e.g. behind a wildcard
/// route of another router.
impl Handler for Router {
    fn call(&self, req: Request<Body>) -> BoxFuture<'static, Response> {
        self.dispatch(req)
    }
}

impl Service<Request<Body>> for Router {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let fut = self.dispatch(req);
        Box::pin(async move { Ok(fut.await) })
    }
}

fn parse_method(method: &str) -> RouteResult<Method> {
    Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .map_err(|_| RouteError::InvalidMethod(method.to_string()))
}
