//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject redirect rules that cannot route (empty exact source, empty target)
//! - Compile every pattern rule once so a bad expression fails the load
//! - Check response header names and the log level
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: EdgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into an execution context

use axum::http::HeaderName;
use regex::Regex;
use thiserror::Error;

use crate::config::schema::EdgeConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "none"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("redirect #{index}: exact source is empty")]
    EmptySource { index: usize },

    #[error("redirect #{index} ({rule}): target is empty")]
    EmptyTarget { index: usize, rule: String },

    #[error("redirect #{index}: pattern {pattern:?} does not compile: {message}")]
    Pattern {
        index: usize,
        pattern: String,
        message: String,
    },

    #[error("response header {name:?} is not a valid header name")]
    HeaderName { name: String },

    #[error("response header {name:?} has no values")]
    EmptyHeader { name: String },

    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &EdgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (index, rule) in config.redirects.iter().enumerate() {
        // An empty pattern is valid and matches every path.
        if !rule.is_pattern && rule.source.is_empty() {
            errors.push(ValidationError::EmptySource { index });
        }
        if rule.target.is_empty() {
            errors.push(ValidationError::EmptyTarget {
                index,
                rule: rule.source.clone(),
            });
        }
        if rule.is_pattern {
            if let Err(e) = Regex::new(&rule.source) {
                errors.push(ValidationError::Pattern {
                    index,
                    pattern: rule.source.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    for (name, entries) in config.response_headers.iter() {
        if HeaderName::from_bytes(name.as_bytes()).is_err() {
            errors.push(ValidationError::HeaderName {
                name: name.to_string(),
            });
        } else if entries.is_empty() {
            errors.push(ValidationError::EmptyHeader {
                name: name.to_string(),
            });
        }
    }

    if !LOG_LEVELS.contains(&config.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::LogLevel(config.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
