//! Compiled redirect index.
//!
//! # Responsibilities
//! - Split configured rules into an exact-match map and an ordered pattern list
//! - Compile pattern sources once per execution context
//! - Answer "which target, if any" for a request path
//!
//! # Design Decisions
//! - Exact rules are checked before any pattern, whatever the declaration order
//! - Duplicate exact sources: last declaration wins
//! - Patterns keep declaration order; first match wins, not best match
//! - Patterns are unanchored searches; anchor with `^`/`$` in the source

use std::collections::HashMap;

use regex::Regex;

use crate::config::{ConfigError, EdgeConfig, RedirectRule, ValidationError};
use crate::lifecycle::Compile;

/// Pattern rule with its compiled expression.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub pattern: Regex,
    pub target: String,
}

/// Immutable lookup structure built from the redirect rules.
#[derive(Debug, Clone, Default)]
pub struct RedirectIndex {
    exact: HashMap<String, String>,
    patterns: Vec<PatternRule>,
}

impl RedirectIndex {
    /// Compile `rules`. Fails on the first pattern that does not compile.
    pub fn from_rules(rules: &[RedirectRule]) -> Result<Self, ConfigError> {
        let mut index = Self::default();

        for (i, rule) in rules.iter().enumerate() {
            if rule.is_pattern {
                let pattern = Regex::new(&rule.source).map_err(|e| {
                    ConfigError::Validation(vec![ValidationError::Pattern {
                        index: i,
                        pattern: rule.source.clone(),
                        message: e.to_string(),
                    }])
                })?;
                index.patterns.push(PatternRule {
                    pattern,
                    target: rule.target.clone(),
                });
            } else if let Some(previous) =
                index.exact.insert(rule.source.clone(), rule.target.clone())
            {
                tracing::warn!(
                    source = %rule.source,
                    previous = %previous,
                    target = %rule.target,
                    "Duplicate exact redirect, last declaration wins"
                );
            }
        }

        Ok(index)
    }

    /// Redirect target for `uri`: exact map first, then patterns in order.
    pub fn find_target(&self, uri: &str) -> Option<&str> {
        if let Some(target) = self.exact.get(uri) {
            return Some(target);
        }

        self.patterns
            .iter()
            .find(|rule| rule.pattern.is_match(uri))
            .map(|rule| rule.target.as_str())
    }

    pub fn exact_len(&self) -> usize {
        self.exact.len()
    }

    pub fn pattern_len(&self) -> usize {
        self.patterns.len()
    }
}

impl Compile for RedirectIndex {
    fn compile(config: &EdgeConfig) -> Result<Self, ConfigError> {
        let index = Self::from_rules(&config.redirects)?;
        tracing::info!(
            exact = index.exact_len(),
            patterns = index.pattern_len(),
            "Redirect index compiled"
        );
        Ok(index)
    }
}
