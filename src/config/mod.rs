//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML/JSON) or in-memory value
//!     → source.rs (ConfigSource::load)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, pattern compilation)
//!     → EdgeConfig (validated, immutable)
//!     → owned by one ExecutionContext for its whole lifetime
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; a new context is a new load
//! - All fields except the credentials have defaults
//! - Validation separates syntactic (serde) from semantic checks
//! - A config that fails validation fails the invocation; there is no
//!   fallback to defaults

pub mod loader;
pub mod schema;
pub mod source;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError, ConfigFormat};
pub use schema::{EdgeConfig, RedirectRule};
pub use source::{ConfigSource, FileSource, StaticSource, CONFIG_ENV};
pub use validation::{validate_config, ValidationError};
