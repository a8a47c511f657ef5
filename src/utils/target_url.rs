//! Target URL validation.
//!
//! The stored target is the caller's input, trimmed but otherwise verbatim;
//! validation only proves it parses as an absolute http(s) URL with a host.

use thiserror::Error;
use url::Url;

/// Errors that can occur while validating a target URL.
#[derive(Debug, Error)]
pub enum TargetUrlError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Validates a redirect target and returns it trimmed.
///
/// # Rules
///
/// 1. Must parse as an absolute URL
/// 2. Scheme must be `http` or `https` (rejects `javascript:`, `data:`, ...)
/// 3. Must have a host
///
/// The returned string is the trimmed input, not a re-serialized canonical
/// form — what the creator supplied is what redirects are issued to.
pub fn validate_target_url(input: &str) -> Result<String, TargetUrlError> {
    let trimmed = input.trim();

    let url = Url::parse(trimmed).map_err(|e| TargetUrlError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(TargetUrlError::UnsupportedProtocol),
    }

    if !url.has_host() {
        return Err(TargetUrlError::MissingHost);
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_https_url() {
        let result = validate_target_url("https://example.com/a/b");
        assert_eq!(result.unwrap(), "https://example.com/a/b");
    }

    #[test]
    fn test_valid_http_url() {
        let result = validate_target_url("http://example.com");
        assert_eq!(result.unwrap(), "http://example.com");
    }

    #[test]
    fn test_input_is_trimmed_not_rewritten() {
        let result = validate_target_url("  https://EXAMPLE.com:443/Path#frag  ");
        // Trimmed, but host case, default port, and fragment stay untouched.
        assert_eq!(result.unwrap(), "https://EXAMPLE.com:443/Path#frag");
    }

    #[test]
    fn test_query_params_preserved() {
        let result = validate_target_url("https://example.com/search?q=rust&lang=en");
        assert_eq!(result.unwrap(), "https://example.com/search?q=rust&lang=en");
    }

    #[test]
    fn test_missing_scheme_rejected() {
        let result = validate_target_url("example.com/path");
        assert!(matches!(result, Err(TargetUrlError::InvalidFormat(_))));
    }

    #[test]
    fn test_empty_input_rejected() {
        let result = validate_target_url("   ");
        assert!(matches!(result, Err(TargetUrlError::InvalidFormat(_))));
    }

    #[test]
    fn test_ftp_rejected() {
        let result = validate_target_url("ftp://example.com/file.txt");
        assert!(matches!(result, Err(TargetUrlError::UnsupportedProtocol)));
    }

    #[test]
    fn test_javascript_rejected() {
        let result = validate_target_url("javascript:alert('xss')");
        assert!(matches!(result, Err(TargetUrlError::UnsupportedProtocol)));
    }

    #[test]
    fn test_data_url_rejected() {
        let result = validate_target_url("data:text/plain,Hello");
        assert!(matches!(result, Err(TargetUrlError::UnsupportedProtocol)));
    }

    #[test]
    fn test_mailto_rejected() {
        let result = validate_target_url("mailto:test@example.com");
        assert!(matches!(result, Err(TargetUrlError::UnsupportedProtocol)));
    }

    #[test]
    fn test_ip_address_host_allowed() {
        let result = validate_target_url("http://192.168.1.1:8080/api");
        assert!(result.is_ok());
    }

    #[test]
    fn test_localhost_allowed() {
        let result = validate_target_url("http://localhost:3000/test");
        assert!(result.is_ok());
    }
}
