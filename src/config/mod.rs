//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → handed to the server shell at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; routes are registered in code
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ListenerConfig, LogFormat, ObservabilityConfig, ServerConfig, TimeoutConfig};
pub use validation::ValidationError;
