//! Output module for rendering stored URLs and checks
//!
//! This module formats plain-text tables for the command line:
//! - The URL listing with each URL's latest check
//! - The detail view of one URL and all of its checks

use crate::analyzer::UrlDetail;
use crate::storage::UrlSummary;
use chrono::{DateTime, Utc};

/// Formats a stored timestamp for display
///
/// Falls back to the raw value if it is not RFC 3339.
pub fn display_timestamp(raw: &str) -> String {
    raw.parse::<DateTime<Utc>>()
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Formats the URL listing
///
/// # Arguments
///
/// * `urls` - URLs with their latest check
///
/// # Returns
///
/// A table with one row per URL, or a short note if there is nothing to show
pub fn format_url_list(urls: &[UrlSummary]) -> String {
    if urls.is_empty() {
        return "No checked URLs yet\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<6} {:<40} {:<20} {}\n",
        "ID", "Name", "Last check", "Status"
    ));

    for url in urls {
        out.push_str(&format!(
            "{:<6} {:<40} {:<20} {}\n",
            url.url_id,
            url.name,
            display_timestamp(&url.created_at),
            url.status_code
        ));
    }

    out
}

/// Formats one URL with all of its checks
pub fn format_url_detail(detail: &UrlDetail) -> String {
    let mut out = String::new();

    out.push_str(&format!("Site: {}\n", detail.record.name));
    out.push_str(&format!("  ID: {}\n", detail.record.id));
    out.push_str(&format!(
        "  Created: {}\n",
        display_timestamp(&detail.record.created_at)
    ));
    out.push('\n');

    if detail.checks.is_empty() {
        out.push_str("No checks yet\n");
        return out;
    }

    out.push_str(&format!("Checks ({}):\n", detail.checks.len()));
    for check in &detail.checks {
        out.push_str(&format!(
            "  #{} [{}] status {}\n",
            check.id,
            display_timestamp(&check.created_at),
            check.status_code
        ));
        out.push_str(&format!("    h1: {}\n", check.h1));
        out.push_str(&format!("    title: {}\n", check.title));
        out.push_str(&format!("    description: {}\n", check.description));
    }

    out
}
