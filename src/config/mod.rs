//! Configuration module for catsearch
//!
//! TOML-based application configuration with environment variable
//! overrides, plus path resolution helpers.

pub mod app_config;
pub mod path_resolver;

pub use app_config::AppConfig;
