//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Router / server
//!     → logging.rs (structured log events)
//!     → metrics.rs (dispatch counters)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows through all subsystems
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
