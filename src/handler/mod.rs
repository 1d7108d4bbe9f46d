//! Edge handlers: the deployable units.
//!
//! # Data Flow
//! ```text
//! EdgeRequest
//!     → ExecutionContext::get (lazy config load + compile)
//!     → access.rs:   authorize → Forward | Respond(401)
//!     → redirect.rs: resolve   → Respond(301) | Forward(rewritten) | Forward
//! ```
//!
//! # Design Decisions
//! - Handlers are independent; each owns its own execution context
//! - Both return the same `EdgeOutcome` shape
//! - Configuration failure fails the invocation; no default routing

pub mod access;
pub mod redirect;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;
use crate::http::{EdgeRequest, EdgeResponse};

pub use access::AccessGateHandler;
pub use redirect::RedirectHandler;

/// What the platform does with the invocation's result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum EdgeOutcome {
    /// Answer the client directly.
    Respond(EdgeResponse),
    /// Continue to the origin with this (possibly rewritten) request.
    Forward(EdgeRequest),
}

impl EdgeOutcome {
    pub fn response(&self) -> Option<&EdgeResponse> {
        match self {
            EdgeOutcome::Respond(response) => Some(response),
            EdgeOutcome::Forward(_) => None,
        }
    }

    pub fn request(&self) -> Option<&EdgeRequest> {
        match self {
            EdgeOutcome::Forward(request) => Some(request),
            EdgeOutcome::Respond(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("configuration unavailable: {0}")]
    Config(#[from] ConfigError),
}
