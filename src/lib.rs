//! Edge access control and routing.
//!
//! Decides, for each request reaching a content-delivery edge node, whether
//! to deny it with a basic-auth challenge, redirect it, rewrite its path or
//! pass it through unchanged.

pub mod config;
pub mod handler;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;

pub use config::schema::EdgeConfig;
pub use handler::{AccessGateHandler, EdgeOutcome, HandlerError, RedirectHandler};
pub use lifecycle::ExecutionContext;
