//! HTTP fetcher implementation
//!
//! This module handles the single outbound request made for a check:
//! - Building the HTTP client with user agent and timeouts
//! - GET requests to fetch page content
//! - Error classification

use crate::config::HttpConfig;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors that make a check attempt fail
///
/// Any of these means no check is recorded.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(reqwest::Error),

    #[error("HTTP error status {0}")]
    Status(u16),

    #[error("failed to read response body: {0}")]
    Body(reqwest::Error),
}

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,
    /// HTTP status code
    pub status_code: u16,
    /// Page body content
    pub body: String,
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use page_analyzer::checker::build_http_client;
/// use page_analyzer::config::HttpConfig;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with a single GET request
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx / 3xx final status | `Ok(FetchedPage)` |
/// | 4xx / 5xx final status | `CheckError::Status` |
/// | Timeout | `CheckError::Timeout` |
/// | DNS, connection refused, TLS error | `CheckError::Network` |
/// | Body read failure | `CheckError::Body` |
///
/// Redirects are followed by the client; there is no retry.
pub async fn fetch_page(client: &Client, url: &str) -> Result<FetchedPage, CheckError> {
    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            CheckError::Timeout
        } else {
            CheckError::Network(e)
        }
    })?;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(CheckError::Status(status.as_u16()));
    }

    let final_url = response.url().to_string();
    let body = response.text().await.map_err(|e| {
        if e.is_timeout() {
            CheckError::Timeout
        } else {
            CheckError::Body(e)
        }
    })?;

    Ok(FetchedPage {
        final_url,
        status_code: status.as_u16(),
        body,
    })
}
