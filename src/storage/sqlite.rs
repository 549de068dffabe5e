//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.
//! Every operation opens its own connection, which is closed when it goes out
//! of scope on every exit path.

use crate::checker::PageCheck;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageResult};
use crate::storage::{timestamp_now, UrlCheck, UrlRecord, UrlSummary};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// SQLite storage backend
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    path: PathBuf,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// Creates the database file (and its parent directory) if missing and
    /// initializes the schema.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let storage = Self {
            path: path.to_path_buf(),
        };

        let conn = storage.connect()?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        initialize_schema(&conn)?;

        tracing::debug!("Opened database at {}", path.display());
        Ok(storage)
    }

    /// Path of the underlying database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a connection for a single operation
    fn connect(&self) -> StorageResult<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch(
            "
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;
        Ok(conn)
    }
}

fn url_from_row(row: &Row<'_>) -> rusqlite::Result<UrlRecord> {
    Ok(UrlRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: row.get(2)?,
    })
}

fn check_from_row(row: &Row<'_>) -> rusqlite::Result<UrlCheck> {
    Ok(UrlCheck {
        id: row.get(0)?,
        url_id: row.get(1)?,
        status_code: row.get(2)?,
        h1: row.get(3)?,
        title: row.get(4)?,
        description: row.get(5)?,
        created_at: row.get(6)?,
    })
}

impl Storage for SqliteStorage {
    // ===== URL Management =====

    fn create_url(&self, name: &str) -> StorageResult<i64> {
        let conn = self.connect()?;
        let now = timestamp_now();
        conn.execute(
            "INSERT INTO urls (name, created_at) VALUES (?1, ?2)",
            params![name, now],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn find_url_by_id(&self, id: i64) -> StorageResult<Option<UrlRecord>> {
        let conn = self.connect()?;
        let record = conn
            .query_row(
                "SELECT id, name, created_at FROM urls WHERE id = ?1",
                params![id],
                url_from_row,
            )
            .optional()?;
        Ok(record)
    }

    fn find_url_by_name(&self, name: &str) -> StorageResult<Option<UrlRecord>> {
        let conn = self.connect()?;
        let record = conn
            .query_row(
                "SELECT id, name, created_at FROM urls WHERE name = ?1",
                params![name],
                url_from_row,
            )
            .optional()?;
        Ok(record)
    }

    fn list_urls(&self, limit: u32) -> StorageResult<Vec<UrlSummary>> {
        let conn = self.connect()?;

        // Equal timestamps resolve to the highest check id
        let mut stmt = conn.prepare(
            "SELECT u.id, u.name, c.status_code, c.created_at
             FROM urls AS u
             JOIN url_checks AS c
               ON c.id = (
                   SELECT id FROM url_checks
                   WHERE url_id = u.id
                   ORDER BY created_at DESC, id DESC
                   LIMIT 1
               )
             ORDER BY u.id DESC
             LIMIT ?1",
        )?;

        let urls = stmt
            .query_map(params![limit], |row| {
                Ok(UrlSummary {
                    url_id: row.get(0)?,
                    name: row.get(1)?,
                    status_code: row.get(2)?,
                    created_at: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(urls)
    }

    fn delete_url(&self, id: i64) -> StorageResult<bool> {
        let conn = self.connect()?;
        let removed = conn.execute("DELETE FROM urls WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }

    // ===== Check Management =====

    fn create_check(&self, url_id: i64, check: &PageCheck) -> StorageResult<i64> {
        let conn = self.connect()?;
        let now = timestamp_now();
        conn.execute(
            "INSERT INTO url_checks (url_id, status_code, h1, title, description, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                url_id,
                check.status_code,
                check.h1.as_deref().unwrap_or(""),
                check.title.as_deref().unwrap_or(""),
                check.description.as_deref().unwrap_or(""),
                now
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn find_check_by_id(&self, id: i64) -> StorageResult<Option<UrlCheck>> {
        let conn = self.connect()?;
        let check = conn
            .query_row(
                "SELECT id, url_id, status_code, h1, title, description, created_at
                 FROM url_checks WHERE id = ?1",
                params![id],
                check_from_row,
            )
            .optional()?;
        Ok(check)
    }

    fn list_checks_for_url(&self, url_id: i64) -> StorageResult<Vec<UrlCheck>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, url_id, status_code, h1, title, description, created_at
             FROM url_checks
             WHERE url_id = ?1
             ORDER BY created_at DESC, id DESC",
        )?;

        let checks = stmt
            .query_map(params![url_id], check_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(checks)
    }
}
