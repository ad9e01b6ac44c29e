//! Route pattern compilation.
//!
//! # Responsibilities
//! - Split a pattern on `/` into segment descriptors
//! - Compile `:name|regex` constraints through a shared [`RegexCache`]
//! - Reject patterns that can never behave as written
//!
//! # Pattern Syntax
//! ```text
//! /users              literal segments
//! /users/:id          named parameter, any non-empty value
//! /users/:id|[0-9]+   named parameter, value must match the regex
//! /files/...          wildcard tail, binds the rest of the path under "..."
//! ```
//!
//! # Design Decisions
//! - Regex constraints match the whole segment (compiled as `^(?:re)$`)
//! - Each distinct regex source is compiled at most once per cache
//! - The cache is an explicit handle shared by a router and its groups

use std::sync::Arc;

use dashmap::DashMap;
use regex::Regex;

use crate::routing::error::{RouteError, RouteResult};

/// Reserved segment for wildcard tails, and the key its value is bound to.
pub const WILDCARD: &str = "...";

const PARAM_PREFIX: char = ':';
const REGEX_DELIMITER: char = '|';

/// One `/`-delimited piece of a compiled pattern.
#[derive(Debug, Clone)]
pub enum Segment {
    Literal(String),
    Param { name: String, regex: Option<Regex> },
    Wildcard,
}

/// A parsed route pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
    wildcard: bool,
}

impl Pattern {
    /// Parse `pattern`, compiling any regex constraints through `cache`.
    pub fn compile(pattern: &str, cache: &RegexCache) -> RouteResult<Self> {
        let raw: Vec<&str> = pattern.split('/').collect();
        let last = raw.len() - 1;

        let mut segments = Vec::with_capacity(raw.len());
        for (i, segment) in raw.into_iter().enumerate() {
            segments.push(parse_segment(segment, i == last, pattern, cache)?);
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
            wildcard: pattern.ends_with("/..."),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True iff the pattern ends with `/...`.
    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }
}

fn parse_segment(
    segment: &str,
    is_last: bool,
    pattern: &str,
    cache: &RegexCache,
) -> RouteResult<Segment> {
    if segment == WILDCARD {
        if !is_last {
            return Err(RouteError::MisplacedWildcard(pattern.to_string()));
        }
        return Ok(Segment::Wildcard);
    }

    let Some(param) = segment.strip_prefix(PARAM_PREFIX) else {
        return Ok(Segment::Literal(segment.to_string()));
    };

    match param.split_once(REGEX_DELIMITER) {
        Some((name, source)) => Ok(Segment::Param {
            name: name.to_string(),
            regex: Some(cache.get_or_compile(source)?),
        }),
        None => Ok(Segment::Param {
            name: param.to_string(),
            regex: None,
        }),
    }
}

/// Compiled regex constraints keyed by their source text.
///
/// Clones share the same storage. Entries are never evicted.
#[derive(Debug, Clone, Default)]
pub struct RegexCache {
    inner: Arc<DashMap<String, Regex>>,
}

impl RegexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the compiled, fully anchored form of `source`, compiling it on
    /// first use.
    pub fn get_or_compile(&self, source: &str) -> RouteResult<Regex> {
        if let Some(regex) = self.inner.get(source) {
            return Ok(regex.value().clone());
        }

        let regex = Regex::new(&format!("^(?:{source})$")).map_err(|e| {
            RouteError::InvalidRegex {
                source_text: source.to_string(),
                source: e,
            }
        })?;

        tracing::trace!(regex = %source, "Compiled route constraint");
        self.inner.insert(source.to_string(), regex.clone());
        Ok(regex)
    }

    pub fn contains(&self, source: &str) -> bool {
        self.inner.contains_key(source)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
