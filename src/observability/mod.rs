//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and the execution context produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (decision and config-load counters)
//! ```
//!
//! # Design Decisions
//! - Structured fields, never interpolated strings, for machine parsing
//! - Credentials are never logged

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, resolve_level, LogFormat};
