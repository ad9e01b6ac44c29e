//! Route registration errors.

use thiserror::Error;

/// Errors raised while registering a route.
///
/// These are configuration errors: a router that fails registration should
/// never start serving.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A `:name|regex` segment carried an expression that does not compile.
    #[error("invalid regex '{source_text}' in route pattern: {source}")]
    InvalidRegex {
        source_text: String,
        #[source]
        source: regex::Error,
    },

    /// A method string is not a valid HTTP method token.
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// `...` used anywhere but as the final segment.
    #[error("wildcard '...' must be the final segment of pattern '{0}'")]
    MisplacedWildcard(String),
}

pub type RouteResult<T> = Result<T, RouteError>;
