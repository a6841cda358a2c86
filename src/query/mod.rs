//! Query construction module
//!
//! Translates typed search parameters into the boolean/full-text query
//! body understood by the catalog search engine.

mod builder;

pub use builder::build_query;

use thiserror::Error;

/// Default number of results requested per search
pub const DEFAULT_NUM_RESULTS: usize = 10;

/// Errors raised while validating search parameters
#[derive(Debug, Error)]
pub enum QueryError {
    /// The query string was empty or whitespace-only
    #[error("query_string must not be empty")]
    EmptyQueryString,
}

/// Typed parameters for one catalog search call
#[derive(Debug, Clone)]
pub struct SearchParameters {
    /// Free-text query matched against product names and descriptions
    pub query_string: String,
    /// Optional exact-match filter on availability
    pub availability: Option<String>,
    /// Optional exact-match filter on product class
    pub product_class: Option<String>,
    /// Optional inclusive lower bound on average rating
    pub min_average_rating: Option<f64>,
    /// Number of results to return
    pub num_results: usize,
}

impl SearchParameters {
    /// Create parameters with only a query string set
    pub fn new(query_string: impl Into<String>) -> Self {
        Self {
            query_string: query_string.into(),
            availability: None,
            product_class: None,
            min_average_rating: None,
            num_results: DEFAULT_NUM_RESULTS,
        }
    }

    /// Set the availability filter
    pub fn with_availability(mut self, availability: Option<String>) -> Self {
        self.availability = availability;
        self
    }

    /// Set the product class filter
    pub fn with_product_class(mut self, product_class: Option<String>) -> Self {
        self.product_class = product_class;
        self
    }

    /// Set the minimum average rating filter
    pub fn with_min_average_rating(mut self, min_average_rating: Option<f64>) -> Self {
        self.min_average_rating = min_average_rating;
        self
    }

    /// Set the number of results to return
    pub fn with_num_results(mut self, num_results: usize) -> Self {
        self.num_results = num_results;
        self
    }
}
