//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Request path
//!     → index.rs (exact map lookup, then ordered pattern scan)
//!     → resolver.rs (fall back to the .html rewrite or passthrough)
//!     → Return: Redirect / Rewrite / Passthrough
//!
//! Index Compilation (first invocation of a context):
//!     RedirectRule[]
//!     → exact rules into a HashMap, patterns into an ordered Vec
//!     → Freeze as immutable RedirectIndex
//! ```
//!
//! # Design Decisions
//! - Index compiled once per execution context, immutable afterwards
//! - Deterministic: same input always yields the same decision
//! - Exact before pattern; first pattern match wins

pub mod index;
pub mod resolver;

pub use index::{PatternRule, RedirectIndex};
pub use resolver::{has_extension, is_well_known, resolve, RouteDecision};
