//! Application configuration module for catsearch
//!
//! Provides TOML-based configuration with environment variable override support.
//! Priority: CLI args > Environment variables > Config file > Defaults

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the search engine (default: http://localhost:9200)
    #[serde(default = "default_engine_url")]
    engine_url: String,

    /// API key for the search engine
    #[serde(default)]
    engine_api_key: Option<String>,

    /// Name of the product catalog index (default: wands)
    #[serde(default = "default_index")]
    index: String,

    /// Default number of results to return
    #[serde(default = "default_num_results")]
    default_num_results: usize,
}

fn default_engine_url() -> String {
    "http://localhost:9200".to_string()
}

fn default_index() -> String {
    "wands".to_string()
}

fn default_num_results() -> usize {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine_url: default_engine_url(),
            engine_api_key: None,
            index: default_index(),
            default_num_results: default_num_results(),
        }
    }
}

impl AppConfig {
    /// Create config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;
        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file: {}", e))?;
        Ok(config)
    }

    /// Create config from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(engine_url) = std::env::var("CATSEARCH_ENGINE_URL") {
            config.engine_url = engine_url;
        }

        if let Ok(api_key) = std::env::var("CATSEARCH_API_KEY") {
            config.engine_api_key = Some(api_key);
        } else if let Ok(api_key) = std::env::var("ES_LOCAL_API_KEY") {
            config.engine_api_key = Some(api_key);
        }

        if let Ok(index) = std::env::var("CATSEARCH_INDEX") {
            config.index = index;
        }

        if let Ok(num_results) = std::env::var("CATSEARCH_NUM_RESULTS") {
            if let Ok(n) = num_results.parse() {
                config.default_num_results = n;
            }
        }

        config
    }

    /// Merge with another config (other takes priority for non-default values)
    pub fn merge_with(&self, other: &Self) -> Self {
        Self {
            engine_url: if other.engine_url != default_engine_url() {
                other.engine_url.clone()
            } else {
                self.engine_url.clone()
            },
            engine_api_key: other
                .engine_api_key
                .clone()
                .or_else(|| self.engine_api_key.clone()),
            index: if other.index != default_index() {
                other.index.clone()
            } else {
                self.index.clone()
            },
            default_num_results: if other.default_num_results != default_num_results() {
                other.default_num_results
            } else {
                self.default_num_results
            },
        }
    }

    /// Override engine_url
    pub fn with_engine_url(mut self, url: &str) -> Self {
        self.engine_url = url.to_string();
        self
    }

    /// Override index
    pub fn with_index(mut self, index: &str) -> Self {
        self.index = index.to_string();
        self
    }

    /// Override default_num_results
    pub fn with_default_num_results(mut self, n: usize) -> Self {
        self.default_num_results = n;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.default_num_results == 0 {
            return Err(anyhow!("default_num_results must be greater than 0"));
        }

        if self.index.is_empty() {
            return Err(anyhow!("index must not be empty"));
        }

        Ok(())
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| anyhow!("Failed to serialize config: {}", e))
    }

    // Getters
    pub fn engine_url(&self) -> &str {
        &self.engine_url
    }

    pub fn engine_api_key(&self) -> Option<String> {
        self.engine_api_key.clone()
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn default_num_results(&self) -> usize {
        self.default_num_results
    }
}
