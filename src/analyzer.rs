//! Analyzer service - URL submission and check orchestration
//!
//! This module ties the validator, the checker and the storage layer
//! together. Each public method is one user-facing operation:
//! - Submitting a URL
//! - Listing URLs with their latest check
//! - Showing one URL with its checks
//! - Running a new check

use crate::checker::{build_http_client, check_page};
use crate::config::Config;
use crate::storage::{Storage, StorageError, UrlCheck, UrlRecord, UrlSummary};
use crate::url::{normalize, validate, ValidationErrors};
use crate::{AnalyzerError, Result};
use reqwest::Client;

/// Outcome of a successful URL submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// A new record was created
    Added(i64),
    /// The normalized URL was already stored
    Existing(i64),
}

impl Submission {
    /// ID of the record the submission resolved to
    pub fn id(&self) -> i64 {
        match self {
            Self::Added(id) | Self::Existing(id) => *id,
        }
    }
}

/// A URL record with all of its checks, newest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlDetail {
    pub record: UrlRecord,
    pub checks: Vec<UrlCheck>,
}

/// Service coordinating URL submissions and checks
pub struct Analyzer<S: Storage> {
    config: Config,
    storage: S,
    client: Client,
}

impl<S: Storage> Analyzer<S> {
    /// Creates a new analyzer
    ///
    /// # Arguments
    ///
    /// * `config` - The application configuration
    /// * `storage` - The storage backend
    ///
    /// # Returns
    ///
    /// * `Ok(Analyzer)` - Successfully created analyzer
    /// * `Err(AnalyzerError)` - Failed to build the HTTP client
    pub fn new(config: Config, storage: S) -> Result<Self> {
        let client = build_http_client(&config.http)?;
        Ok(Self::with_client(config, storage, client))
    }

    /// Creates an analyzer around an existing HTTP client
    pub fn with_client(config: Config, storage: S, client: Client) -> Self {
        Self {
            config,
            storage,
            client,
        }
    }

    /// The storage backend
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Validates, normalizes and stores a submitted URL
    ///
    /// If the normalized URL is already stored, the existing record is
    /// returned instead of creating a new one.
    ///
    /// # Returns
    ///
    /// * `Ok(Submission)` - The record the submission resolved to
    /// * `Err(AnalyzerError::Validation)` - The URL was rejected; nothing stored
    /// * `Err(AnalyzerError::Storage)` - Persisting failed
    pub fn submit_url(&self, raw: &str) -> Result<Submission> {
        let errors = validate(raw);
        if !errors.is_empty() {
            tracing::debug!("Rejected URL {:?}: {:?}", raw, errors);
            return Err(ValidationErrors(errors).into());
        }

        let name = normalize(raw);
        if let Some(existing) = self.storage.find_url_by_name(&name)? {
            tracing::info!("URL {} already stored with id {}", name, existing.id);
            return Ok(Submission::Existing(existing.id));
        }

        match self.storage.create_url(&name) {
            Ok(id) => {
                tracing::info!("Added URL {} with id {}", name, id);
                Ok(Submission::Added(id))
            }
            // Lost a race against a concurrent submission of the same name
            Err(StorageError::ConstraintViolation(msg)) => {
                tracing::warn!("Insert of {} hit a constraint: {}", name, msg);
                let existing = self
                    .storage
                    .find_url_by_name(&name)?
                    .ok_or(StorageError::ConstraintViolation(msg))?;
                Ok(Submission::Existing(existing.id))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Lists stored URLs with their latest check
    pub fn list_urls(&self) -> Result<Vec<UrlSummary>> {
        Ok(self.storage.list_urls(self.config.analyzer.list_limit)?)
    }

    /// Gets one URL and all of its checks
    ///
    /// # Returns
    ///
    /// * `Ok(UrlDetail)` - The record and its checks
    /// * `Err(AnalyzerError::UrlNotFound)` - No record with this id
    pub fn url_detail(&self, id: i64) -> Result<UrlDetail> {
        let record = self.find_record(id)?;
        let checks = self.storage.list_checks_for_url(id)?;
        Ok(UrlDetail { record, checks })
    }

    /// Runs a new check against a stored URL and records the result
    ///
    /// A failed fetch or an HTTP error status records nothing.
    ///
    /// # Returns
    ///
    /// * `Ok(UrlCheck)` - The stored check
    /// * `Err(AnalyzerError::UrlNotFound)` - No record with this id
    /// * `Err(AnalyzerError::CheckFailed)` - The page could not be checked
    pub async fn run_check(&self, id: i64) -> Result<UrlCheck> {
        let record = self.find_record(id)?;

        tracing::info!("Checking {}", record.name);
        let page = check_page(&self.client, &record.name)
            .await
            .map_err(|source| {
                tracing::warn!("Check of {} failed: {}", record.name, source);
                AnalyzerError::CheckFailed {
                    url: record.name.clone(),
                    source,
                }
            })?;

        let check_id = self.storage.create_check(record.id, &page)?;
        tracing::info!(
            "Recorded check {} for {} (status {})",
            check_id,
            record.name,
            page.status_code
        );

        // The row was just written; not reading it back is a storage fault
        self.storage
            .find_check_by_id(check_id)?
            .ok_or_else(|| StorageError::Sqlite(rusqlite::Error::QueryReturnedNoRows).into())
    }

    fn find_record(&self, id: i64) -> Result<UrlRecord> {
        self.storage
            .find_url_by_id(id)?
            .ok_or(AnalyzerError::UrlNotFound(id))
    }
}
