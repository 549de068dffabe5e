//! HTML parser for extracting SEO fields
//!
//! This module extracts from a page:
//! - The first `<h1>` heading
//! - The page title
//! - The meta description

use scraper::{ElementRef, Html, Selector};

/// SEO fields extracted from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageData {
    /// Text of the first `<h1>` element
    pub h1: Option<String>,

    /// Text of the first `<title>` element
    pub title: Option<String>,

    /// Content of the first `<meta name="description">` element
    pub description: Option<String>,
}

/// Parses HTML content and extracts the SEO fields
///
/// Each field is optional: a missing or empty element yields `None`.
///
/// # Example
///
/// ```
/// use page_analyzer::checker::parse_page;
///
/// let html = r#"<html><head><title>T</title></head><body><h1>H</h1></body></html>"#;
/// let page = parse_page(html);
/// assert_eq!(page.title.as_deref(), Some("T"));
/// assert_eq!(page.h1.as_deref(), Some("H"));
/// assert_eq!(page.description, None);
/// ```
pub fn parse_page(html: &str) -> PageData {
    let document = Html::parse_document(html);

    PageData {
        h1: first_text(&document, "h1"),
        title: first_text(&document, "title"),
        description: extract_description(&document),
    }
}

/// Extracts the text of the first element matching `selector`
fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|element| element_text(&element))
}

/// Extracts the meta description, falling back to the element's text
fn extract_description(document: &Html) -> Option<String> {
    let selector = Selector::parse("meta[name='description']").ok()?;
    let element = document.select(&selector).next()?;

    element
        .value()
        .attr("content")
        .map(|content| content.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| element_text(&element))
}

fn element_text(element: &ElementRef<'_>) -> Option<String> {
    Some(element.text().collect::<String>().trim().to_string()).filter(|s| !s.is_empty())
}
