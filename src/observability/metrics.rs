//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Count dispatch outcomes
//! - Expose a Prometheus-compatible scrape endpoint when enabled
//!
//! # Metrics
//! - `mux_dispatch_total` (counter): dispatches by `outcome`
//!   (`matched`, `not_found`, `method_not_allowed`, `options`)
//!
//! # Design Decisions
//! - Recording without an installed exporter is a no-op, so the library
//!   never requires one

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// How the dispatcher resolved a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Matched,
    NotFound,
    MethodNotAllowed,
    Options,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Matched => "matched",
            Outcome::NotFound => "not_found",
            Outcome::MethodNotAllowed => "method_not_allowed",
            Outcome::Options => "options",
        }
    }
}

/// Record one dispatch.
pub fn record_dispatch(outcome: Outcome) {
    metrics::counter!("mux_dispatch_total", "outcome" => outcome.as_str()).increment(1);
}

/// Install the Prometheus recorder and its HTTP scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}
