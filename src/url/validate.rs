use std::fmt;
use std::net::Ipv4Addr;
use thiserror::Error;
use url::{Host, Url};

/// Longest URL (in characters) accepted for submission
pub const MAX_URL_LENGTH: usize = 255;

/// Schemes accepted as a valid absolute URL
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ftp", "ftps"];

/// A single reason a submitted URL was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid URL")]
    Invalid,

    #[error("URL exceeds 255 characters")]
    TooLong,

    #[error("URL is required")]
    Required,
}

/// Every validation failure reported for one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates a raw URL submitted by the user
///
/// # Checks
///
/// 1. The string must be a well-formed absolute URL → `Invalid`
/// 2. Longer than 255 characters → `TooLong`
/// 3. Otherwise, if empty → `Required`
///
/// Check 1 is independent of checks 2 and 3, so more than one error may be
/// returned. Checks 2 and 3 never fire together.
///
/// # Returns
///
/// An empty vector when the URL is acceptable
///
/// # Examples
///
/// ```
/// use page_analyzer::url::{validate, ValidationError};
///
/// assert!(validate("https://example.com/page").is_empty());
/// assert_eq!(
///     validate(""),
///     vec![ValidationError::Invalid, ValidationError::Required]
/// );
/// ```
pub fn validate(raw: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !is_valid_url(raw) {
        errors.push(ValidationError::Invalid);
    }

    if raw.chars().count() > MAX_URL_LENGTH {
        errors.push(ValidationError::TooLong);
    } else if raw.is_empty() {
        errors.push(ValidationError::Required);
    }

    errors
}

/// Returns true if `raw` is a syntactically valid absolute URL
///
/// A valid URL has an allowed scheme and a host that is an IP address,
/// `localhost`, or a dotted domain name with an alphabetic top-level label.
pub fn is_valid_url(raw: &str) -> bool {
    if raw.is_empty() || raw.chars().any(char::is_whitespace) {
        return false;
    }

    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(_) => return false,
    };

    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        return false;
    }

    match url.host() {
        // The parser also turns shorthand like `12345` or `0x7f.1` into an
        // address, so only a literal dotted quad counts.
        Some(Host::Ipv4(_)) => {
            raw_host(raw).is_some_and(|host| host.parse::<Ipv4Addr>().is_ok())
        }
        Some(Host::Ipv6(_)) => true,
        Some(Host::Domain(domain)) => domain == "localhost" || is_valid_domain(domain),
        None => false,
    }
}

/// Host text exactly as written in `raw`, without userinfo or port
fn raw_host(raw: &str) -> Option<&str> {
    let (_, rest) = raw.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);
    if host_port.starts_with('[') {
        return host_port.split_once(']').map(|(host, _)| &host[1..]);
    }
    Some(host_port.split_once(':').map_or(host_port, |(host, _)| host))
}

fn is_valid_domain(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    if !labels.iter().all(|label| is_valid_label(label)) {
        return false;
    }

    // split() always yields at least one element
    let tld = labels[labels.len() - 1];
    tld.len() >= 2 && (tld.chars().all(|c| c.is_ascii_alphabetic()) || tld.starts_with("xn--"))
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_url_passes() {
        assert!(validate("https://example.com").is_empty());
        assert!(validate("http://sub.example.co.uk/path?q=1#frag").is_empty());
        assert!(validate("http://127.0.0.1:8080/").is_empty());
        assert!(validate("http://localhost:3000").is_empty());
        assert!(validate("http://user:pw@10.0.0.1:81/x").is_empty());
        assert!(validate("http://[::1]:8080/").is_empty());
    }

    #[test]
    fn test_raw_host_extraction() {
        assert_eq!(raw_host("http://1.2.3.4:80/p"), Some("1.2.3.4"));
        assert_eq!(raw_host("http://u:p@0x7f.1?q"), Some("0x7f.1"));
        assert_eq!(raw_host("http://[::1]:8080"), Some("::1"));
        assert_eq!(raw_host("no-scheme"), None);
    }

    #[test]
    fn test_empty_url_is_required_not_too_long() {
        let errors = validate("");
        assert!(errors.contains(&ValidationError::Required));
        assert!(!errors.contains(&ValidationError::TooLong));
        assert_eq!(
            errors,
            vec![ValidationError::Invalid, ValidationError::Required]
        );
    }

    #[test]
    fn test_too_long_valid_shape() {
        let url = format!("https://example.com/{}", "a".repeat(250));
        assert!(url.len() > MAX_URL_LENGTH);
        assert_eq!(validate(&url), vec![ValidationError::TooLong]);
    }

    #[test]
    fn test_too_long_and_invalid() {
        let url = "x".repeat(300);
        assert_eq!(
            validate(&url),
            vec![ValidationError::Invalid, ValidationError::TooLong]
        );
    }

    #[test]
    fn test_exactly_max_length_is_accepted() {
        let prefix = "https://example.com/";
        let url = format!("{}{}", prefix, "a".repeat(MAX_URL_LENGTH - prefix.len()));
        assert_eq!(url.len(), MAX_URL_LENGTH);
        assert!(validate(&url).is_empty());
    }

    #[test]
    fn test_invalid_urls() {
        for raw in [
            "not a url",
            "example.com",
            "https://",
            "mailto:user@example.com",
            "javascript:alert(1)",
            "https://example",
            "https://-bad.com",
            "https://exa mple.com",
            "https://example.c",
            "https://example.123",
            "http://12345",
            "http://1.2.3",
            "http://0x7f.1/",
            "https://999999999",
        ] {
            assert_eq!(
                validate(raw),
                vec![ValidationError::Invalid],
                "expected {raw:?} to be invalid"
            );
        }
    }

    #[test]
    fn test_ftp_scheme_is_valid() {
        assert!(is_valid_url("ftp://files.example.org/pub"));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ValidationError::Invalid.to_string(), "Invalid URL");
        assert_eq!(
            ValidationError::TooLong.to_string(),
            "URL exceeds 255 characters"
        );
        assert_eq!(ValidationError::Required.to_string(), "URL is required");

        let errors = ValidationErrors(vec![ValidationError::Invalid, ValidationError::Required]);
        assert_eq!(errors.to_string(), "Invalid URL; URL is required");
    }
}
