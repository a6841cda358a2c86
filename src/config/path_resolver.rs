//! Path resolution module for catsearch
//!
//! Provides utilities for resolving file paths with support for:
//! - Absolute paths (returned as-is)
//! - Tilde (~) expansion to home directory
//! - Relative paths (resolved from current directory)
//! - XDG Base Directory specification compliance

use anyhow::{anyhow, Result};
use std::path::PathBuf;

/// Expand tilde (~) in path to home directory
pub fn expand_home(path: &str) -> Result<PathBuf> {
    if let Some(stripped) = path.strip_prefix('~') {
        let home =
            std::env::var("HOME").map_err(|_| anyhow!("HOME environment variable not set"))?;
        if stripped.is_empty() {
            Ok(PathBuf::from(home))
        } else if stripped.starts_with('/') {
            Ok(PathBuf::from(format!("{}{}", home, stripped)))
        } else {
            // ~username format not supported, return as-is
            Ok(PathBuf::from(path))
        }
    } else {
        Ok(PathBuf::from(path))
    }
}

/// Resolve a path to an absolute path
///
/// Resolution order:
/// 1. Expand ~ to home directory
/// 2. If absolute, return as-is
/// 3. If relative, resolve from current directory
pub fn resolve_path(path: &str) -> Result<PathBuf> {
    let expanded = expand_home(path)?;

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        let current_dir = std::env::current_dir()
            .map_err(|e| anyhow!("Failed to get current directory: {}", e))?;
        Ok(current_dir.join(expanded))
    }
}

/// Get the XDG config directory for catsearch
///
/// Returns: $XDG_CONFIG_HOME/catsearch or ~/.config/catsearch
pub fn get_config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("catsearch")
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config").join("catsearch")
    } else {
        PathBuf::from(".config").join("catsearch")
    }
}

/// Get the default config file path
pub fn get_default_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}
