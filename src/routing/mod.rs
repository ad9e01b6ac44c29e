//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (before serving):
//!     pattern string + handler + methods
//!     → pattern.rs (split into segments, compile regex constraints)
//!     → router.rs (wrap handler in middleware, append one Route per method)
//!
//! Incoming Request (method, path):
//!     → router.rs (scan routes in registration order)
//!     → matcher.rs (segment-by-segment path match)
//!     → params.rs (bind parameters onto the request)
//!     → matched handler | 405 + Allow | automatic OPTIONS | 404
//! ```
//!
//! # Design Decisions
//! - Registration order is priority order: first exact match wins
//! - Deterministic: same input always matches same route
//! - Regex constraints are compiled once at registration, never per request

pub mod error;
pub mod matcher;
pub mod params;
pub mod pattern;
pub mod router;

pub use error::{RouteError, RouteResult};
pub use matcher::Matcher;
pub use params::{param, Params, RequestParamsExt};
pub use pattern::{Pattern, RegexCache, Segment, WILDCARD};
pub use router::{Route, RouteTable, Router, ALL_METHODS};
