//! Search engine HTTP client
//!
//! Provides a structured HTTP client for the catalog search engine with:
//! - ApiKey authentication
//! - Request/response serialization
//! - Error handling with network vs API error distinction
//! - Retry logic with exponential backoff on transport errors

use crate::projection::SearchResponse;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Search engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    /// Network error (connection failed, timeout, etc.)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (4xx/5xx responses)
    #[error("Engine error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Response parsing error
    #[error("Failed to parse engine response: {0}")]
    Parse(String),

    /// Invalid API key
    #[error("Invalid API key")]
    Unauthorized,

    /// Index not found
    #[error("Index not found: {0}")]
    IndexNotFound(String),
}

impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        EngineError::Network(err.to_string())
    }
}

/// Catalog search engine client
///
/// Owned by the hosting application and injected wherever searches are
/// issued; the query and projection layers stay connection-free.
pub struct EngineClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    index: String,
    timeout: Duration,
    max_retries: u32,
}

impl EngineClient {
    /// Default engine base URL (local deployment)
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:9200";

    /// Create a new client against the default local engine
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            api_key: None,
            index: index.into(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
        }
    }

    /// Create a client with custom configuration
    pub fn with_config(
        index: impl Into<String>,
        base_url: Option<String>,
        api_key: Option<String>,
        timeout: Option<Duration>,
        max_retries: Option<u32>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.unwrap_or_else(|| Self::DEFAULT_BASE_URL.to_string()),
            api_key,
            index: index.into(),
            timeout: timeout.unwrap_or(Duration::from_secs(30)),
            max_retries: max_retries.unwrap_or(3),
        }
    }

    /// URL of the search endpoint for the configured index
    pub fn search_url(&self) -> String {
        format!("{}/{}/_search", self.base_url, self.index)
    }

    /// Issue a search request with the given query body
    pub async fn search(&self, body: &Value) -> Result<SearchResponse, EngineError> {
        let url = self.search_url();
        let mut retry_count = 0;

        loop {
            match self.send_request(&url, body).await {
                Ok(response) => return Ok(response),
                Err(EngineError::Network(msg)) if retry_count < self.max_retries => {
                    // Searches are idempotent, so transport failures are retried
                    let wait_time = 2_u64.pow(retry_count);
                    tracing::warn!(
                        "Engine request failed ({}), retrying in {}s",
                        msg,
                        wait_time
                    );
                    tokio::time::sleep(Duration::from_secs(wait_time)).await;
                    retry_count += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send_request(&self, url: &str, body: &Value) -> Result<SearchResponse, EngineError> {
        let mut request = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(body);

        if let Some(api_key) = &self.api_key {
            request = request.header("Authorization", format!("ApiKey {}", api_key));
        }

        let response = request.send().await?;
        let status = response.status();

        if status.as_u16() == 401 {
            return Err(EngineError::Unauthorized);
        }

        if status.as_u16() == 404 {
            return Err(EngineError::IndexNotFound(self.index.clone()));
        }

        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(EngineError::Api {
                status: status.as_u16(),
                message: response_text,
            });
        }

        serde_json::from_str(&response_text)
            .map_err(|e| EngineError::Parse(format!("{}: {}", e, response_text)))
    }

    /// Get base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get index name
    pub fn index(&self) -> &str {
        &self.index
    }
}
