//! Search engine client module
//!
//! HTTP access to the external full-text search engine. The query-building
//! and projection layers never touch the network; this module owns the one
//! round trip per search.

mod client;

pub use client::{EngineClient, EngineError};
