//! Redirect/rewrite resolution.
//!
//! # Responsibilities
//! - Decide, for one request path, between Redirect, Rewrite and Passthrough
//!
//! # Design Decisions
//! - Strict order: exact redirect, pattern redirect, `.html` rewrite,
//!   passthrough
//! - Pure function of (uri, index, config); no state is touched
//! - Only the final `/`-delimited segment is checked for an extension, so
//!   `/a/` (empty final segment) is eligible for the rewrite
//! - `/.well-known` paths are never rewritten

use crate::config::EdgeConfig;
use crate::routing::index::RedirectIndex;

/// Suffix appended by the extension-omission rewrite.
pub const HTML_SUFFIX: &str = ".html";

/// Reserved prefix excluded from rewriting.
pub const WELL_KNOWN_PREFIX: &str = "/.well-known";

/// Outcome of resolving one request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Answer with a 301 to the target.
    Redirect(String),
    /// Forward with the path replaced.
    Rewrite(String),
    /// Forward unchanged.
    Passthrough,
}

impl RouteDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteDecision::Redirect(_) => "redirect",
            RouteDecision::Rewrite(_) => "rewrite",
            RouteDecision::Passthrough => "passthrough",
        }
    }
}

pub fn resolve(uri: &str, index: &RedirectIndex, config: &EdgeConfig) -> RouteDecision {
    if let Some(target) = index.find_target(uri) {
        return RouteDecision::Redirect(target.to_string());
    }

    if config.allow_omit_html_extension && !has_extension(uri) && !is_well_known(uri) {
        return RouteDecision::Rewrite(format!("{uri}{HTML_SUFFIX}"));
    }

    RouteDecision::Passthrough
}

/// Whether the final path segment contains a `.`.
pub fn has_extension(uri: &str) -> bool {
    uri.rsplit('/').next().is_some_and(|segment| segment.contains('.'))
}

pub fn is_well_known(uri: &str) -> bool {
    uri.starts_with(WELL_KNOWN_PREFIX)
}
