//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, path from DECOY_CONFIG or ./decoy.toml)
//!     → loader.rs (parse & deserialize; defaults if no file)
//!     → validation.rs (semantic checks)
//!     → DecoyConfig (validated, immutable)
//!     → shared via Arc with the listener and every handler
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults, so the decoy runs with no config file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_default, ConfigError};
pub use schema::DecoyConfig;
