//! Checker module for on-demand SEO checks
//!
//! This module contains the check pipeline:
//! - HTTP fetching of the stored URL
//! - HTML parsing of `<h1>`, `<title>` and meta description

mod fetcher;
mod parser;

pub use fetcher::{build_http_client, fetch_page, CheckError, FetchedPage};
pub use parser::{parse_page, PageData};

use reqwest::Client;

/// Result of one successful check, ready to be persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageCheck {
    pub status_code: u16,
    pub h1: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl PageCheck {
    /// Builds a check result from a status code and the parsed page fields
    pub fn new(status_code: u16, data: PageData) -> Self {
        Self {
            status_code,
            h1: data.h1,
            title: data.title,
            description: data.description,
        }
    }
}

/// Runs a complete check against a URL
///
/// Fetches the page once and extracts the SEO fields from its body. Any
/// network failure or HTTP error status fails the whole check.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to check
pub async fn check_page(client: &Client, url: &str) -> Result<PageCheck, CheckError> {
    let page = fetch_page(client, url).await?;
    tracing::debug!(
        "Fetched {} (status {}, {} bytes)",
        page.final_url,
        page.status_code,
        page.body.len()
    );

    Ok(PageCheck::new(page.status_code, parse_page(&page.body)))
}
