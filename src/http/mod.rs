//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum listener, trace + timeout layers)
//!     → routing::Router (path/method dispatch)
//!     → middleware/ (wrappers composed at registration)
//!     → handler.rs (application handler, or response.rs defaults)
//!     → Send to client
//! ```

pub mod handler;
pub mod middleware;
pub mod response;
pub mod server;

pub use handler::{BoxHandler, Handler};
pub use middleware::request_id::{RequestId, RequestIdExt, X_REQUEST_ID};
pub use middleware::{from_fn, Middleware, MiddlewareChain};
pub use server::HttpServer;
