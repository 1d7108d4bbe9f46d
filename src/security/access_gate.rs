//! Static basic-credential access gate.
//!
//! # Responsibilities
//! - Build the expected `Authorization` value from configured credentials
//! - Compare it with the first value of the request's `authorization` header
//! - Decide Allow or Deny; the caller turns Deny into a 401 challenge
//!
//! # Design Decisions
//! - The expected token is computed once per execution context
//! - Comparison is over the raw header bytes, no decoding of the request
//!   value; only an exact match is accepted
//! - Comparison runs in constant time; the outcome equals plain equality

use base64::{engine::general_purpose::STANDARD, Engine};
use subtle::ConstantTimeEq;

use crate::config::{ConfigError, EdgeConfig};
use crate::http::request::EdgeRequest;
use crate::lifecycle::Compile;

/// Outcome of the access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny,
}

impl AccessDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessDecision::Allow => "allow",
            AccessDecision::Deny => "deny",
        }
    }
}

/// Expected `Authorization` header value.
#[derive(Clone)]
pub struct BasicCredentials {
    expected: String,
}

impl BasicCredentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            expected: basic_token(username, password),
        }
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("expected", &"<redacted>")
            .finish()
    }
}

impl Compile for BasicCredentials {
    fn compile(config: &EdgeConfig) -> Result<Self, ConfigError> {
        let username = config
            .basic_auth_username
            .as_deref()
            .ok_or(ConfigError::MissingField("basic_auth_username"))?;
        let password = config
            .basic_auth_password
            .as_deref()
            .ok_or(ConfigError::MissingField("basic_auth_password"))?;
        Ok(Self::new(username, password))
    }
}

/// `Basic ` + base64(`username:password`).
pub fn basic_token(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

/// Check the request's credentials.
pub fn authorize(request: &EdgeRequest, credentials: &BasicCredentials) -> AccessDecision {
    match request.headers.first_value("authorization") {
        Some(value) if bool::from(value.as_bytes().ct_eq(credentials.expected.as_bytes())) => {
            AccessDecision::Allow
        }
        _ => AccessDecision::Deny,
    }
}
