//! Route matching logic.
//!
//! # Responsibilities
//! - Match request path segments against a compiled pattern
//! - Bind named parameters and the wildcard tail on success
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Method is not considered here; the dispatcher compares it separately
//!   so a path-only match can still contribute to the `Allow` header
//! - A wildcard route tolerates any trailing length, including none
//! - Paths are percent-decoded before splitting, so an encoded `/` splits
//!   like a literal one

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

use crate::routing::params::Params;
use crate::routing::pattern::{Pattern, Segment, WILDCARD};

/// Trait for matching request paths against a route condition.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns the bound parameters if `path` (split on `/`) matches.
    fn match_path(&self, path: &[&str]) -> Option<Params>;
}

impl Matcher for Pattern {
    fn match_path(&self, path: &[&str]) -> Option<Params> {
        match_segments(self.segments(), self.is_wildcard(), path)
    }
}

/// Match `path` segment by segment against `segments`.
pub fn match_segments(segments: &[Segment], wildcard: bool, path: &[&str]) -> Option<Params> {
    if !wildcard && segments.len() != path.len() {
        return None;
    }

    let mut params = Params::new();
    for (i, segment) in segments.iter().enumerate() {
        match (segment, path.get(i).copied()) {
            (Segment::Wildcard, _) => {
                let rest = path.get(i..).unwrap_or_default();
                params.insert(WILDCARD, rest.join("/"));
                return Some(params);
            }
            (_, None) => return None,
            (Segment::Literal(literal), Some(value)) => {
                if literal != value {
                    return None;
                }
            }
            (Segment::Param { name, regex: Some(regex) }, Some(value)) => {
                if !regex.is_match(value) {
                    return None;
                }
                params.insert(name.as_str(), value);
            }
            (Segment::Param { name, regex: None }, Some(value)) => {
                if value.is_empty() {
                    return None;
                }
                params.insert(name.as_str(), value);
            }
        }
    }

    Some(params)
}

/// Split a request path into the segments the matcher expects.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').collect()
}

/// Percent-decode a request path. A path that does not decode to UTF-8 is
/// matched as received.
pub fn decode_path(path: &str) -> Cow<'_, str> {
    percent_decode_str(path)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(path))
}
