//! Configuration schema definitions.
//!
//! This module defines the configuration consumed by the edge handlers.
//! All types derive Serde traits for deserialization from TOML or JSON.
//! Field names are snake_case; the camelCase spellings used by the edge
//! platform's JSON configuration are accepted as aliases.

use serde::{Deserialize, Serialize};

use crate::http::headers::EdgeHeaders;

/// Root configuration for the edge handlers.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct EdgeConfig {
    /// Username expected by the access gate. Required by that handler only.
    #[serde(alias = "basicAuthUsername")]
    pub basic_auth_username: Option<String>,

    /// Password expected by the access gate. Required by that handler only.
    #[serde(alias = "basicAuthPassword")]
    pub basic_auth_password: Option<String>,

    /// Redirect rules; order matters among pattern rules only.
    pub redirects: Vec<RedirectRule>,

    /// Rewrite extensionless paths to `<path>.html`.
    #[serde(alias = "allowOmitHtmlExtension")]
    pub allow_omit_html_extension: bool,

    /// Headers merged into every generated response.
    #[serde(alias = "cloud_front_headers", alias = "cloudFrontHeaders")]
    pub response_headers: EdgeHeaders,

    /// Log level (trace, debug, info, warn, error, none).
    #[serde(alias = "logLevel")]
    pub log_level: String,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            basic_auth_username: None,
            basic_auth_password: None,
            redirects: Vec::new(),
            allow_omit_html_extension: false,
            response_headers: EdgeHeaders::new(),
            log_level: "info".to_string(),
        }
    }
}

/// A single redirect rule.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RedirectRule {
    /// Literal path, or a regular expression when `is_pattern` is set.
    pub source: String,

    /// Value of the `Location` header.
    pub target: String,

    /// Treat `source` as a regular expression.
    #[serde(rename = "regex", default)]
    pub is_pattern: bool,
}

impl RedirectRule {
    pub fn exact(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            is_pattern: false,
        }
    }

    pub fn pattern(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            is_pattern: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_config() {
        let text = r#"
            basic_auth_username = "admin"
            basic_auth_password = "secret"
            allow_omit_html_extension = true

            [[redirects]]
            source = "/old"
            target = "/new"

            [[redirects]]
            source = "^/blog/.*"
            target = "/articles"
            regex = true

            [response_headers]
            "Strict-Transport-Security" = "max-age=63072000"
        "#;
        let config: EdgeConfig = toml::from_str(text).unwrap();

        assert_eq!(config.basic_auth_username.as_deref(), Some("admin"));
        assert!(config.allow_omit_html_extension);
        assert_eq!(config.redirects[0], RedirectRule::exact("/old", "/new"));
        assert_eq!(config.redirects[1], RedirectRule::pattern("^/blog/.*", "/articles"));
        assert_eq!(
            config.response_headers.first_value("strict-transport-security"),
            Some("max-age=63072000")
        );
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_platform_json_config() {
        let text = r#"{
            "basicAuthUsername": "u",
            "basicAuthPassword": "p",
            "allowOmitHtmlExtension": false,
            "logLevel": "debug",
            "redirects": [{ "source": "/a", "target": "/b", "regex": false }],
            "cloudFrontHeaders": {
                "x-frame-options": [{ "key": "X-Frame-Options", "value": "DENY" }]
            },
            "userPoolArn": "ignored"
        }"#;
        let config: EdgeConfig = serde_json::from_str(text).unwrap();

        assert_eq!(config.basic_auth_password.as_deref(), Some("p"));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.redirects.len(), 1);
        assert_eq!(config.response_headers.first_value("x-frame-options"), Some("DENY"));
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: EdgeConfig = toml::from_str("").unwrap();
        assert_eq!(config, EdgeConfig::default());
    }
}
