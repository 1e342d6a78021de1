//! Error types for the volby.cz scraper
//!
//! Every failure aborts the run, so the variants carry enough context
//! (URL, locator, path) for the final diagnostic to be useful on its own.

use thiserror::Error;

/// Coarse classification of a [`VolbyError`].
///
/// The pipeline never recovers from any of these; the kind only decides
/// how the failure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A page could not be retrieved (network failure or non-2xx status)
    Fetch,
    /// A page was retrieved but its layout did not match the locators
    Parse,
    /// An output file could not be created or written
    Io,
}

/// Error type for volby.cz scraper operations
#[derive(Error, Debug)]
pub enum VolbyError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// Failed to parse HTML content
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),

    /// Required HTML element was not found
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Invalid URL, either configured or scraped from a page
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Output file could not be written
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV serialization failed
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl VolbyError {
    /// Map this error onto its [`ErrorKind`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::HttpError(_) | Self::HttpStatus { .. } => ErrorKind::Fetch,
            Self::ParseError(_) | Self::ElementNotFound(_) | Self::InvalidUrl(_) => {
                ErrorKind::Parse
            }
            Self::IoError(_) | Self::CsvError(_) => ErrorKind::Io,
        }
    }
}

/// Result type alias for volby.cz scraper operations
pub type Result<T> = std::result::Result<T, VolbyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_http_status() {
        let error = VolbyError::HttpStatus {
            status: 503,
            url: "https://www.volby.cz/pls/ps2017nss/ps3".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "HTTP 503 for https://www.volby.cz/pls/ps2017nss/ps3"
        );
    }

    #[test]
    fn test_display_parse_error() {
        let error = VolbyError::ParseError("missing element".to_string());
        assert_eq!(error.to_string(), "Failed to parse HTML: missing element");
    }

    #[test]
    fn test_display_element_not_found() {
        let error = VolbyError::ElementNotFound("region table".to_string());
        assert_eq!(error.to_string(), "Element not found: region table");
    }

    #[test]
    fn test_display_invalid_url() {
        let error = VolbyError::InvalidUrl("not-a-url".to_string());
        assert_eq!(error.to_string(), "Invalid URL: not-a-url");
    }

    #[test]
    fn test_kind_fetch() {
        let error = VolbyError::HttpStatus {
            status: 404,
            url: "x".to_string(),
        };
        assert_eq!(error.kind(), ErrorKind::Fetch);
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(
            VolbyError::ParseError("x".to_string()).kind(),
            ErrorKind::Parse
        );
        assert_eq!(
            VolbyError::ElementNotFound("x".to_string()).kind(),
            ErrorKind::Parse
        );
        assert_eq!(
            VolbyError::InvalidUrl("x".to_string()).kind(),
            ErrorKind::Parse
        );
    }

    #[test]
    fn test_kind_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = VolbyError::from(io);
        assert_eq!(error.kind(), ErrorKind::Io);
        assert!(error.to_string().contains("denied"));
    }
}
