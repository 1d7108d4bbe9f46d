//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Fresh execution context (empty)
//!     → first invocation: ConfigSource::load → validate → compile
//!     → frozen Loaded<T> snapshot (Arc)
//!     → every later invocation reuses the snapshot
//!
//! Platform discards the context:
//!     → snapshot dropped, no teardown hooks
//! ```
//!
//! # Design Decisions
//! - Lazy startup: nothing is loaded until a request needs it
//! - The context is passed explicitly to handlers, never a global

pub mod context;

pub use context::{Compile, ExecutionContext, Loaded};
