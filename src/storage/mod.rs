//! Storage module for persisting URLs and checks
//!
//! This module handles all database operations, including:
//! - SQLite database initialization and schema management
//! - URL record persistence and lookup
//! - Check persistence and listing

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use chrono::{SecondsFormat, Utc};

/// Represents a submitted URL in the database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}

/// Represents one stored check of a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlCheck {
    pub id: i64,
    pub url_id: i64,
    pub status_code: u16,
    pub h1: String,
    pub title: String,
    pub description: String,
    pub created_at: String,
}

/// A URL listed together with its latest check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlSummary {
    pub url_id: i64,
    pub name: String,
    pub status_code: u16,
    pub created_at: String,
}

/// Current time as a fixed-width RFC 3339 UTC timestamp
///
/// Microsecond precision with a `Z` suffix keeps lexical order equal to
/// chronological order.
pub(crate) fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
