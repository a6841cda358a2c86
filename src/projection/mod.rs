//! Result projection module
//!
//! Deserializes the engine's raw search response and reshapes it into the
//! two textual views consumed downstream: a verbose human-readable listing
//! and a compact tool-call listing with facet counts.

mod format;

pub use format::{format_for_human, format_for_toolcall, format_hit};

use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised when the engine response does not match the expected shape
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// A hit's source document lacks a required field, or the field has
    /// the wrong type
    #[error("hit '{hit_id}' is missing required field '{field}'")]
    MissingField { field: &'static str, hit_id: String },

    /// The response envelope itself is malformed
    #[error("malformed search response: {0}")]
    MalformedResponse(String),
}

/// Raw search response envelope, as returned by the engine
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub hits: HitsEnvelope,
    #[serde(default)]
    pub aggregations: BTreeMap<String, Aggregation>,
}

/// The `hits` section of a response
#[derive(Debug, Clone, Deserialize)]
pub struct HitsEnvelope {
    pub total: TotalHits,
    /// Null when the hit list is empty
    pub max_score: Option<f64>,
    pub hits: Vec<Hit>,
}

/// Total hit count wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct TotalHits {
    pub value: u64,
}

/// One scored hit; the source document stays opaque until projection
#[derive(Debug, Clone, Deserialize)]
pub struct Hit {
    #[serde(rename = "_score")]
    pub score: f64,
    #[serde(rename = "_source")]
    pub source: serde_json::Value,
}

/// One named terms aggregation
#[derive(Debug, Clone, Deserialize)]
pub struct Aggregation {
    pub buckets: Vec<Bucket>,
}

/// One facet bucket: a category value and its document count
#[derive(Debug, Clone, Deserialize)]
pub struct Bucket {
    pub key: String,
    pub doc_count: u64,
}
