//! Synthesized responses.
//!
//! # Responsibilities
//! - Build the two responses the edge handlers generate: the 401 basic
//!   auth challenge and the 301 redirect
//! - Merge configured response headers into every generated response
//! - Serialize in the platform's shape (status as a string)

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::http::headers::EdgeHeaders;

/// Body returned with the 401 challenge.
pub const UNAUTHORIZED_BODY: &str = "You are not authorized to enter";

/// Cache lifetime attached to redirects.
pub const REDIRECT_CACHE_CONTROL: &str = "max-age=3600";

/// Response generated at the edge instead of forwarding to the origin.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeResponse {
    #[serde(serialize_with = "status_to_string", deserialize_with = "status_from_string")]
    pub status: u16,

    pub status_description: String,

    #[serde(default)]
    pub headers: EdgeHeaders,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl EdgeResponse {
    /// 401 challenge asking the client for basic credentials.
    pub fn unauthorized(extra_headers: &EdgeHeaders) -> Self {
        let mut headers = EdgeHeaders::new();
        headers.insert("WWW-Authenticate", "Basic");
        headers.merge(extra_headers);

        Self {
            status: 401,
            status_description: "Unauthorized".to_string(),
            headers,
            body: Some(UNAUTHORIZED_BODY.to_string()),
        }
    }

    /// Permanent redirect to `target`.
    pub fn moved_permanently(target: &str, extra_headers: &EdgeHeaders) -> Self {
        let mut headers = EdgeHeaders::new();
        headers.insert("Location", target);
        headers.insert("Cache-Control", REDIRECT_CACHE_CONTROL);
        headers.merge(extra_headers);

        Self {
            status: 301,
            status_description: "Moved Permanently".to_string(),
            headers,
            body: None,
        }
    }
}

fn status_to_string<S: Serializer>(status: &u16, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&status.to_string())
}

fn status_from_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Status {
        Number(u16),
        Text(String),
    }

    match Status::deserialize(deserializer)? {
        Status::Number(n) => Ok(n),
        Status::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}
