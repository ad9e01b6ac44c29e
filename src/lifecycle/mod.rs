//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Register routes → Start listener
//!
//! Shutdown (shutdown.rs):
//!     Trigger → Stop accepting → Drain in-flight requests → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Route registration completes before the listener starts
//! - Registration errors are fatal at startup

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownSignal};
pub use signals::trigger_on_signal;
