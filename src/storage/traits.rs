//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::checker::PageCheck;
use crate::storage::{UrlCheck, UrlRecord, UrlSummary};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(rusqlite::Error),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(e, msg)
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                StorageError::ConstraintViolation(msg.unwrap_or_else(|| e.to_string()))
            }
            other => StorageError::Sqlite(other),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// Every method is a single self-contained unit of work; nothing spans
/// multiple calls.
pub trait Storage {
    // ===== URL Management =====

    /// Inserts a new URL record
    ///
    /// # Arguments
    ///
    /// * `name` - The normalized URL
    ///
    /// # Returns
    ///
    /// The ID of the newly created record, or
    /// `StorageError::ConstraintViolation` if the name already exists
    fn create_url(&self, name: &str) -> StorageResult<i64>;

    /// Gets a URL record by ID
    fn find_url_by_id(&self, id: i64) -> StorageResult<Option<UrlRecord>>;

    /// Gets a URL record by its normalized name
    fn find_url_by_name(&self, name: &str) -> StorageResult<Option<UrlRecord>>;

    /// Lists URLs together with their latest check
    ///
    /// URLs without any check are not listed. Rows are ordered by URL id,
    /// newest first, and capped at `limit`.
    fn list_urls(&self, limit: u32) -> StorageResult<Vec<UrlSummary>>;

    /// Deletes a URL record and its checks
    ///
    /// Returns true if a record was removed.
    fn delete_url(&self, id: i64) -> StorageResult<bool>;

    // ===== Check Management =====

    /// Records a check for an existing URL
    ///
    /// # Arguments
    ///
    /// * `url_id` - The checked URL's ID
    /// * `check` - The check result; missing fields are stored as empty strings
    ///
    /// # Returns
    ///
    /// The ID of the new check
    fn create_check(&self, url_id: i64, check: &PageCheck) -> StorageResult<i64>;

    /// Gets a check by ID
    fn find_check_by_id(&self, id: i64) -> StorageResult<Option<UrlCheck>>;

    /// Gets all checks of a URL, newest first
    fn list_checks_for_url(&self, url_id: i64) -> StorageResult<Vec<UrlCheck>>;
}
