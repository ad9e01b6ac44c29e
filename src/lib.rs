//! Path and method request router.
//!
//! Routes are registered as `/`-delimited patterns with literal segments,
//! `:name` parameters, `:name|regex` constrained parameters and a trailing
//! `...` wildcard. Requests are dispatched to the first route whose path
//! and method both match; a path match with the wrong method answers 405
//! (or 204 for OPTIONS) with an `Allow` header, anything else answers 404.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::ServerConfig;
pub use http::{BoxHandler, Handler, HttpServer};
pub use lifecycle::Shutdown;
pub use routing::{param, RequestParamsExt, RouteError, Router};
