//! Multi-value header map in the edge platform's shape.
//!
//! # Responsibilities
//! - Store headers keyed by lower-cased name, each with an ordered list of
//!   `{ key, value }` entries (repeated headers keep their order)
//! - Merge configured response headers into generated responses
//! - Accept config-friendly input (`name = "value"`) as well as the
//!   platform's entry-list form
//!
//! # Design Decisions
//! - BTreeMap keeps serialized output stable across runs
//! - `merge` replaces whole entries by name: configured headers win over
//!   generated ones
//! - Input keys differing only in case are combined under one name, in
//!   key order

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

/// A single header occurrence, with the original-case name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HeaderEntry {
    /// Header name as it appears on the wire (e.g. `WWW-Authenticate`).
    #[serde(default)]
    pub key: String,

    /// Header value.
    pub value: String,
}

impl HeaderEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Accepted input shapes for one header name.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HeaderSpec {
    /// `"x-frame-options" = "DENY"`
    Value(String),
    /// `"x-frame-options" = [{ key = "X-Frame-Options", value = "DENY" }]`
    Entries(Vec<HeaderEntry>),
}

/// Header mapping from lower-cased name to its entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, HeaderSpec>")]
pub struct EdgeHeaders(BTreeMap<String, Vec<HeaderEntry>>);

impl EdgeHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries for `name` (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&[HeaderEntry]> {
        self.0.get(&name.to_ascii_lowercase()).map(Vec::as_slice)
    }

    /// Value of the first entry for `name`, the one the platform treats as
    /// the declared value.
    pub fn first_value(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(|entries| entries.first())
            .map(|entry| entry.value.as_str())
    }

    /// Replace all entries for `key` with a single entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.0
            .insert(key.to_ascii_lowercase(), vec![HeaderEntry::new(key, value)]);
    }

    /// Add an entry for `key`, keeping existing ones.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.0
            .entry(key.to_ascii_lowercase())
            .or_default()
            .push(HeaderEntry::new(key, value));
    }

    /// Merge `other` into `self`; names present in `other` replace ours.
    pub fn merge(&mut self, other: &EdgeHeaders) {
        for (name, entries) in &other.0 {
            self.0.insert(name.clone(), entries.clone());
        }
    }

    /// Iterate `(lower-cased name, entries)` in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[HeaderEntry])> {
        self.0
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, HeaderSpec>> for EdgeHeaders {
    fn from(raw: BTreeMap<String, HeaderSpec>) -> Self {
        let mut map: BTreeMap<String, Vec<HeaderEntry>> = BTreeMap::new();
        for (name, spec) in raw {
            let entries: Vec<HeaderEntry> = match spec {
                HeaderSpec::Value(value) => vec![HeaderEntry::new(name.clone(), value)],
                HeaderSpec::Entries(entries) => entries
                    .into_iter()
                    .map(|mut entry| {
                        if entry.key.is_empty() {
                            entry.key = name.clone();
                        }
                        entry
                    })
                    .collect(),
            };
            map.entry(name.to_ascii_lowercase())
                .or_default()
                .extend(entries);
        }
        Self(map)
    }
}

impl Serialize for EdgeHeaders {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut headers = EdgeHeaders::new();
        headers.insert("Authorization", "Basic abc");

        assert_eq!(headers.first_value("authorization"), Some("Basic abc"));
        assert_eq!(headers.first_value("AUTHORIZATION"), Some("Basic abc"));
        assert_eq!(headers.get("authorization").unwrap()[0].key, "Authorization");
    }

    #[test]
    fn test_append_keeps_order() {
        let mut headers = EdgeHeaders::new();
        headers.append("Set-Cookie", "a=1");
        headers.append("set-cookie", "b=2");

        let values: Vec<_> = headers
            .get("set-cookie")
            .unwrap()
            .iter()
            .map(|e| e.value.as_str())
            .collect();
        assert_eq!(values, vec!["a=1", "b=2"]);
        assert_eq!(headers.first_value("set-cookie"), Some("a=1"));
    }

    #[test]
    fn test_merge_overrides_by_name() {
        let mut generated = EdgeHeaders::new();
        generated.insert("Cache-Control", "max-age=3600");
        generated.insert("Location", "/new");

        let mut configured = EdgeHeaders::new();
        configured.insert("cache-control", "no-store");
        configured.insert("X-Frame-Options", "DENY");

        generated.merge(&configured);
        assert_eq!(generated.first_value("cache-control"), Some("no-store"));
        assert_eq!(generated.first_value("location"), Some("/new"));
        assert_eq!(generated.first_value("x-frame-options"), Some("DENY"));
        assert_eq!(generated.len(), 3);
    }

    #[test]
    fn test_case_variant_keys_are_combined() {
        let json = r#"{
            "X-Frame-Options": "DENY",
            "x-frame-options": [{ "key": "x-frame-options", "value": "SAMEORIGIN" }]
        }"#;
        let headers: EdgeHeaders = serde_json::from_str(json).unwrap();

        assert_eq!(headers.len(), 1);
        let values: Vec<_> = headers
            .get("x-frame-options")
            .unwrap()
            .iter()
            .map(|e| e.value.as_str())
            .collect();
        assert_eq!(values, vec!["DENY", "SAMEORIGIN"]);
    }

    #[test]
    fn test_deserialize_both_shapes() {
        let json = r#"{
            "Strict-Transport-Security": "max-age=63072000",
            "x-frame-options": [{ "key": "X-Frame-Options", "value": "DENY" }],
            "x-empty-key": [{ "value": "1" }]
        }"#;
        let headers: EdgeHeaders = serde_json::from_str(json).unwrap();

        let hsts = headers.get("strict-transport-security").unwrap();
        assert_eq!(hsts[0].key, "Strict-Transport-Security");
        assert_eq!(hsts[0].value, "max-age=63072000");
        assert_eq!(headers.first_value("x-frame-options"), Some("DENY"));
        assert_eq!(headers.get("x-empty-key").unwrap()[0].key, "x-empty-key");
    }
}
