//! Platform event envelope.
//!
//! The edge platform wraps each request as
//! `{ "Records": [ { "cf": { "request": { ... } } } ] }`. Only the first
//! record is used; viewer/origin metadata under `cf.config` is ignored.

use serde::Deserialize;
use thiserror::Error;

use crate::http::request::EdgeRequest;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("invalid event JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("event contains no records")]
    NoRecords,
}

#[derive(Debug, Deserialize)]
pub struct EdgeEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<EventRecord>,
}

#[derive(Debug, Deserialize)]
pub struct EventRecord {
    pub cf: CfPayload,
}

#[derive(Debug, Deserialize)]
pub struct CfPayload {
    pub request: EdgeRequest,
}

impl EdgeEvent {
    pub fn from_json(text: &str) -> Result<Self, EventError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Request of the first record.
    pub fn into_request(self) -> Result<EdgeRequest, EventError> {
        self.records
            .into_iter()
            .next()
            .map(|record| record.cf.request)
            .ok_or(EventError::NoRecords)
    }
}
