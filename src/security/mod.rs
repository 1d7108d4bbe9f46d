//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → access_gate.rs (compare Authorization with configured credentials)
//!     → Allow: forward unmodified
//!     → Deny: 401 challenge with WWW-Authenticate: Basic
//! ```
//!
//! # Design Decisions
//! - Fail closed: a missing or malformed header is a Deny
//! - No session or token flows, static credentials only

pub mod access_gate;

pub use access_gate::{authorize, basic_token, AccessDecision, BasicCredentials};
