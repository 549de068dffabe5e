//! Configuration module for Page Analyzer
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every setting has a default, so a missing section falls back to it.
//!
//! # Example
//!
//! ```no_run
//! use page_analyzer::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("page-analyzer.toml")).unwrap();
//! println!("Checks time out after {}s", config.http.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{AnalyzerConfig, Config, DatabaseConfig, HttpConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config, DATABASE_PATH_ENV};
