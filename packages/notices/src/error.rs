//! Error types for the notices client.
//!
//! Only configuration, transport and format failures are errors. A portal
//! that answers with an `<Error>` element produces a regular
//! [`Notices`](crate::notices::Notices) value carrying the message, and
//! malformed notice records are dropped during parsing.

use thiserror::Error;

/// Main error type for the notices library.
#[derive(Debug, Error)]
pub enum NoticesError {
    /// The portal host could not be turned into a valid endpoint URL.
    #[error("Invalid Domain/URL for KAMAR: '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The configured proxy was rejected by the HTTP client.
    #[error("Invalid proxy '{proxy}': {source}")]
    InvalidProxy {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    /// Missing or malformed configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid request date format.
    #[error("Invalid date format: '{0}'. Expected DD/MM/YYYY (e.g., 01/01/2020)")]
    InvalidDate(String),

    /// HTTP request failed (connect, send, receive, timeout or non-2xx status).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The portal answered with markup that is not well-formed XML.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// The response body is not valid UTF-8.
    #[error("Response is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl NoticesError {
    /// Whether the error was raised while building the client or its inputs.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::InvalidUrl { .. } | Self::InvalidProxy { .. } | Self::Config(_) | Self::InvalidDate(_)
        )
    }

    /// Whether the error came from the network round trip.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    /// Whether the portal's response could not be parsed.
    #[must_use]
    pub fn is_format(&self) -> bool {
        matches!(self, Self::XmlParse(_) | Self::Encoding(_))
    }
}

/// Result type alias for notices operations.
pub type Result<T> = std::result::Result<T, NoticesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NoticesError::InvalidDate("2020-01-01".to_string());
        assert!(err.to_string().contains("2020-01-01"));
        assert!(err.to_string().contains("DD/MM/YYYY"));
    }

    #[test]
    fn test_invalid_url_display() {
        let source = url::Url::parse("https://exa mple.com/").unwrap_err();
        let err = NoticesError::InvalidUrl {
            url: "https://exa mple.com/api/api.php".to_string(),
            source,
        };
        assert!(err
            .to_string()
            .starts_with("Invalid Domain/URL for KAMAR: 'https://exa mple.com/api/api.php'"));
        assert!(err.is_config());
        assert!(!err.is_transport());
    }

    #[test]
    fn test_xml_error_is_format() {
        let source = roxmltree::Document::parse("<Notices>").unwrap_err();
        let err = NoticesError::from(source);
        assert!(err.is_format());
        assert!(!err.is_config());
        assert!(err.to_string().starts_with("XML parsing failed:"));
    }

    #[test]
    fn test_encoding_error_is_format() {
        let bytes = b"<Subject>Caf\xE9</Subject>".to_vec();
        let source = std::str::from_utf8(&bytes).unwrap_err();
        let err = NoticesError::from(source);
        assert!(err.is_format());
        assert!(!err.is_transport());
    }
}
