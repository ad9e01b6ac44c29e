//! Request-scoped path parameters.
//!
//! The dispatcher attaches a [`Params`] extension to every request it hands
//! to a matched route. Handlers read it back with [`param`] or
//! [`RequestParamsExt::param`]:
//!
//! ```
//! use axum::{body::Body, http::Request};
//! use path_mux::routing::RequestParamsExt;
//!
//! async fn show_user(req: Request<Body>) -> String {
//!     format!("user {}", req.param("id"))
//! }
//! ```
//!
//! Lookups never fail. A missing parameter reads as the empty string.

use std::collections::HashMap;

use axum::http::Request;

use crate::routing::pattern::WILDCARD;

/// Parameters bound by a route match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: HashMap<String, String>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, replacing any earlier value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Value bound to `name`, or `""`.
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    /// The wildcard tail, or `""`.
    pub fn wildcard(&self) -> &str {
        self.get(WILDCARD)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Overlay `other` on top of these bindings.
    pub(crate) fn merge(&mut self, other: Params) {
        self.values.extend(other.values);
    }

    /// Attach these bindings to `req`, on top of any it already carries.
    pub(crate) fn attach<B>(self, req: &mut Request<B>) {
        match req.extensions_mut().get_mut::<Params>() {
            Some(existing) => existing.merge(self),
            None => {
                req.extensions_mut().insert(self);
            }
        }
    }
}

/// Look up a path parameter on `req`; `""` if it is not bound.
pub fn param<'a, B>(req: &'a Request<B>, name: &str) -> &'a str {
    req.extensions()
        .get::<Params>()
        .map(|params| params.get(name))
        .unwrap_or("")
}

/// Path parameter access on requests.
pub trait RequestParamsExt {
    /// Value bound to `name`, or `""`.
    fn param(&self, name: &str) -> &str;

    /// All parameters bound to this request, if it was routed.
    fn params(&self) -> Option<&Params>;
}

impl<B> RequestParamsExt for Request<B> {
    fn param(&self, name: &str) -> &str {
        param(self, name)
    }

    fn params(&self) -> Option<&Params> {
        self.extensions().get::<Params>()
    }
}
