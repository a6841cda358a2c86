//! catsearch: Product catalog search layer
//!
//! This library sits between an LLM tool-call dispatcher (or a human at a
//! terminal) and an external full-text search engine. It builds the
//! boolean/full-text query body for a catalog search and reshapes the
//! engine's raw response into the textual views downstream consumers read.
//!
//! # Features
//!
//! - Typed search parameters with phrase and exact-match relevance boosting
//! - Optional availability, product class, and minimum rating filters
//! - Product class facet aggregation (up to 10 buckets)
//! - Human-readable and tool-call result projections
//! - MCP server exposing catalog search as an LLM tool
//!
//! # Modules
//!
//! - `config`: Application configuration and path resolution
//! - `query`: Search parameter types and query body construction
//! - `projection`: Response envelope types and textual projections
//! - `engine`: HTTP client for the external search engine

pub mod config;
pub mod engine;
pub mod projection;
pub mod query;

// Re-export commonly used types
pub use engine::{EngineClient, EngineError};
pub use projection::{ProjectionError, SearchResponse};
pub use query::{build_query, QueryError, SearchParameters};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
