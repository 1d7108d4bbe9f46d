//! Inbound request as delivered by the edge platform.
//!
//! # Responsibilities
//! - Carry the fields the handlers read (uri, headers) plus the ones they
//!   must forward untouched (method, querystring, client ip)
//! - Round-trip the platform's JSON request object
//!
//! # Design Decisions
//! - `uri` is the path only; the query string lives in its own field
//! - The request is owned by the invocation; a rewrite mutates it in place

use serde::{Deserialize, Serialize};

use crate::http::headers::EdgeHeaders;

/// Request object handed to a handler for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRequest {
    #[serde(default = "default_method")]
    pub method: String,

    /// Request path, e.g. `/docs/intro`.
    pub uri: String,

    /// Raw query string without the leading `?`.
    #[serde(default)]
    pub querystring: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,

    #[serde(default)]
    pub headers: EdgeHeaders,
}

fn default_method() -> String {
    "GET".to_string()
}

impl EdgeRequest {
    /// A GET request for `uri` with no headers.
    pub fn get(uri: impl Into<String>) -> Self {
        Self {
            method: default_method(),
            uri: uri.into(),
            querystring: String::new(),
            client_ip: None,
            headers: EdgeHeaders::new(),
        }
    }

    /// Builder-style header append.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(key, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_platform_request() {
        let json = r#"{
            "clientIp": "203.0.113.178",
            "headers": {
                "host": [{ "key": "Host", "value": "d111111abcdef8.cloudfront.net" }],
                "authorization": [{ "key": "Authorization", "value": "Basic dTpw" }]
            },
            "method": "GET",
            "querystring": "size=large",
            "uri": "/picture.jpg"
        }"#;
        let request: EdgeRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.uri, "/picture.jpg");
        assert_eq!(request.querystring, "size=large");
        assert_eq!(request.client_ip.as_deref(), Some("203.0.113.178"));
        assert_eq!(request.headers.first_value("authorization"), Some("Basic dTpw"));
    }

    #[test]
    fn test_minimal_request_defaults() {
        let request: EdgeRequest = serde_json::from_str(r#"{ "uri": "/" }"#).unwrap();
        assert_eq!(request, EdgeRequest::get("/"));
    }
}
