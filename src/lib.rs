//! Page Analyzer: on-demand SEO checks for stored URLs
//!
//! This crate stores submitted URLs (normalized to `scheme://host`), fetches
//! them on demand and records the HTTP status, first `<h1>`, `<title>` and
//! meta description of each check in a SQLite database.

pub mod analyzer;
pub mod checker;
pub mod config;
pub mod output;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Page Analyzer operations
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Validation(#[from] crate::url::ValidationErrors),

    #[error("Page not found: url id {0}")]
    UrlNotFound(i64),

    #[error("Check failed for {url}: {source}")]
    CheckFailed {
        url: String,
        source: checker::CheckError,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Page Analyzer operations
pub type Result<T> = std::result::Result<T, AnalyzerError>;

// Re-export commonly used types
pub use analyzer::{Analyzer, Submission, UrlDetail};
pub use config::Config;
pub use crate::url::{normalize, validate, ValidationError};
