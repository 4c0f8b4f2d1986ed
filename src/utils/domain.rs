//! Utility functions for handling hosts and address parts.

use crate::core::error::{AppError, Result};
use url::Url;

/// Extracts the lower-cased host from a page URL.
///
/// Returns `Err(AppError::InvalidInput)` if the input is empty or has no host,
/// and `Err(AppError::UrlParse)` if it cannot be parsed at all.
pub(crate) fn get_host_from_url(page_url: &str) -> Result<String> {
    let trimmed_input = page_url.trim();
    if trimmed_input.is_empty() {
        return Err(AppError::InvalidInput("Page URL is empty".to_string()));
    }

    let url = Url::parse(trimmed_input).map_err(|e| {
        tracing::debug!("Failed to parse page URL '{}': {}", trimmed_input, e);
        AppError::UrlParse(e)
    })?;

    let host = url.host_str().ok_or_else(|| {
        AppError::InvalidInput(format!("Could not extract host from page URL: {}", url))
    })?;

    Ok(host.to_lowercase())
}

/// Splits an address at its last `@` into local part and domain.
pub(crate) fn split_address(email: &str) -> Option<(&str, &str)> {
    email.rsplit_once('@')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_host_from_url_valid() {
        assert_eq!(
            get_host_from_url("https://mail.google.com/mail/u/0/#spam").unwrap(),
            "mail.google.com"
        );
        assert_eq!(
            get_host_from_url(" HTTPS://Mail.Google.com/ ").unwrap(),
            "mail.google.com"
        );
        assert_eq!(
            get_host_from_url("http://localhost:8080/inbox").unwrap(),
            "localhost"
        );
    }

    #[test]
    fn test_get_host_from_url_invalid() {
        assert!(matches!(get_host_from_url(""), Err(AppError::InvalidInput(_))));
        assert!(matches!(get_host_from_url("   "), Err(AppError::InvalidInput(_))));
        assert!(matches!(
            get_host_from_url("mail.google.com/#spam"),
            Err(AppError::UrlParse(_))
        ));
        assert!(get_host_from_url("mailto:a@b.com").is_err());
    }

    #[test]
    fn test_split_address() {
        assert_eq!(split_address("jane@shop.net"), Some(("jane", "shop.net")));
        assert_eq!(split_address("a@b@c.com"), Some(("a@b", "c.com")));
        assert_eq!(split_address("no-at-sign"), None);
    }
}
