//! Protocol constants, endpoint construction and client configuration.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::error::{NoticesError, Result};

/// Path of the KAMAR API script, relative to the portal root.
pub const API_PATH: &str = "api/api.php";

/// Shared key understood by every KAMAR portal for the notices command.
pub const API_KEY: &str = "vtku";

/// KAMAR only answers clients that look like its own mobile app.
pub const USER_AGENT: &str = "KAMAR/ Linux/ Android/";

/// API command that returns the notices for a single day.
pub const COMMAND: &str = "GetNotices";

/// `chrono` format of the `Date` request parameter (DD/MM/YYYY).
pub const REQUEST_DATE_FORMAT: &str = "%d/%m/%Y";

/// `chrono` format of a meeting's display date (e.g. "Wed 1 Jan"), without the year.
pub const MEETING_DATE_FORMAT: &str = "%a %d %b";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Request date pattern: DD/MM/YYYY.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("valid regex"));

/// Build the notices endpoint for a portal host.
///
/// A scheme is only added when `host` has none, a single trailing slash is
/// ensured, and [`API_PATH`] is appended.
///
/// # Examples
/// ```
/// use kamar_notices::config::endpoint_url;
///
/// let url = endpoint_url("portal.school.nz", true).unwrap();
/// assert_eq!(url.as_str(), "https://portal.school.nz/api/api.php");
///
/// let url = endpoint_url("http://portal.school.nz/", true).unwrap();
/// assert_eq!(url.as_str(), "http://portal.school.nz/api/api.php");
/// ```
pub fn endpoint_url(host: &str, https: bool) -> Result<Url> {
    let mut url = if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        let scheme = if https { "https://" } else { "http://" };
        format!("{scheme}{host}")
    };
    if !url.ends_with('/') {
        url.push('/');
    }
    url.push_str(API_PATH);

    match Url::parse(&url) {
        Ok(parsed) => Ok(parsed),
        Err(source) => Err(NoticesError::InvalidUrl { url, source }),
    }
}

/// Validate a request date (DD/MM/YYYY).
///
/// The portal accepts any string, so this is only applied to user input
/// (the CLI) and never inside [`NoticesClient::retrieve`](crate::client::NoticesClient::retrieve).
///
/// # Examples
/// ```
/// use kamar_notices::config::validate_date;
///
/// assert!(validate_date("01/01/2020").is_ok());
/// assert!(validate_date("2020-01-01").is_err());
/// assert!(validate_date("31/02/2020").is_err()); // No such day
/// ```
pub fn validate_date(date_str: &str) -> Result<()> {
    if !DATE_PATTERN.is_match(date_str) {
        return Err(NoticesError::InvalidDate(date_str.to_string()));
    }

    chrono::NaiveDate::parse_from_str(date_str, REQUEST_DATE_FORMAT)
        .map_err(|_| NoticesError::InvalidDate(date_str.to_string()))?;

    Ok(())
}

/// Format a calendar date the way the portal expects it.
pub fn format_request_date(date: chrono::NaiveDate) -> String {
    date.format(REQUEST_DATE_FORMAT).to_string()
}

/// Configuration for a [`NoticesClient`](crate::client::NoticesClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Portal host (`portal.school.nz`) or full URL (`https://portal.school.nz/`).
    pub host: String,
    /// Scheme to use when `host` has none.
    pub https: bool,
    /// Proxy URL for all requests. `None` connects directly, ignoring
    /// proxy environment variables.
    pub proxy: Option<String>,
    /// Log every raw portal response at INFO level.
    pub debug: bool,
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Configuration with defaults for everything but the host.
    pub fn new(host: impl Into<String>) -> Self {
        Self::builder(host).build()
    }

    /// Load configuration from environment variables.
    ///
    /// `KAMAR_HOST` is required. `KAMAR_HTTPS`, `KAMAR_PROXY`, `KAMAR_DEBUG`
    /// and `KAMAR_TIMEOUT_SECS` are optional.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup("KAMAR_HOST")
            .filter(|h| !h.trim().is_empty())
            .ok_or_else(|| NoticesError::Config("KAMAR_HOST not set".into()))?;

        let https = match lookup("KAMAR_HTTPS") {
            Some(value) => parse_flag("KAMAR_HTTPS", &value)?,
            None => true,
        };

        let debug = match lookup("KAMAR_DEBUG") {
            Some(value) => parse_flag("KAMAR_DEBUG", &value)?,
            None => false,
        };

        let proxy = lookup("KAMAR_PROXY").filter(|p| !p.trim().is_empty());

        let timeout_secs = match lookup("KAMAR_TIMEOUT_SECS") {
            Some(value) => value.trim().parse::<u64>().map_err(|_| {
                NoticesError::Config(format!("KAMAR_TIMEOUT_SECS is not a number: '{value}'"))
            })?,
            None => HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            host,
            https,
            proxy,
            debug,
            timeout_secs,
        })
    }

    /// Create a config builder.
    pub fn builder(host: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            host: host.into(),
            https: true,
            proxy: None,
            debug: false,
            timeout_secs: HTTP_TIMEOUT_SECS,
        }
    }

    /// The endpoint this configuration points at.
    pub fn endpoint(&self) -> Result<Url> {
        endpoint_url(&self.host, self.https)
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(NoticesError::Config(format!(
            "{name} must be a boolean, got '{value}'"
        ))),
    }
}

/// Builder for constructing a [`ClientConfig`].
pub struct ClientConfigBuilder {
    host: String,
    https: bool,
    proxy: Option<String>,
    debug: bool,
    timeout_secs: u64,
}

impl ClientConfigBuilder {
    pub fn https(mut self, https: bool) -> Self {
        self.https = https;
        self
    }

    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn build(self) -> ClientConfig {
        ClientConfig {
            host: self.host,
            https: self.https,
            proxy: self.proxy,
            debug: self.debug,
            timeout_secs: self.timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_endpoint_url_adds_scheme() {
        assert_eq!(
            endpoint_url("demo.school.kiwi", true).unwrap().as_str(),
            "https://demo.school.kiwi/api/api.php"
        );
        assert_eq!(
            endpoint_url("demo.school.kiwi", false).unwrap().as_str(),
            "http://demo.school.kiwi/api/api.php"
        );
    }

    #[test]
    fn test_endpoint_url_single_trailing_slash() {
        assert_eq!(
            endpoint_url("demo.school.kiwi/", true).unwrap().as_str(),
            "https://demo.school.kiwi/api/api.php"
        );
    }

    #[test]
    fn test_endpoint_url_keeps_existing_scheme() {
        // The https preference only applies to bare hosts
        assert_eq!(
            endpoint_url("http://demo.school.kiwi", true).unwrap().as_str(),
            "http://demo.school.kiwi/api/api.php"
        );
        assert_eq!(
            endpoint_url("https://demo.school.kiwi/", false).unwrap().as_str(),
            "https://demo.school.kiwi/api/api.php"
        );
    }

    #[test]
    fn test_endpoint_url_keeps_path_prefix() {
        assert_eq!(
            endpoint_url("portal.school.nz/kamar", true).unwrap().as_str(),
            "https://portal.school.nz/kamar/api/api.php"
        );
    }

    #[test]
    fn test_endpoint_url_with_port() {
        assert_eq!(
            endpoint_url("127.0.0.1:8080", false).unwrap().as_str(),
            "http://127.0.0.1:8080/api/api.php"
        );
    }

    #[test]
    fn test_endpoint_url_invalid() {
        let err = endpoint_url("exa mple.com", true).unwrap_err();
        assert!(matches!(err, NoticesError::InvalidUrl { .. }));

        let err = endpoint_url("http://[::1", true).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_validate_date_valid() {
        assert!(validate_date("01/01/2020").is_ok());
        assert!(validate_date("29/02/2024").is_ok());
        assert!(validate_date("31/12/1999").is_ok());
    }

    #[test]
    fn test_validate_date_invalid_format() {
        assert!(validate_date("").is_err());
        assert!(validate_date("2020-01-01").is_err());
        assert!(validate_date("1/1/2020").is_err());
        assert!(validate_date("01/01/20").is_err());
    }

    #[test]
    fn test_validate_date_invalid_date() {
        assert!(validate_date("32/01/2020").is_err());
        assert!(validate_date("01/13/2020").is_err());
        assert!(validate_date("29/02/2023").is_err());
    }

    #[test]
    fn test_format_request_date() {
        let date = chrono::NaiveDate::from_ymd_opt(2020, 3, 7).unwrap();
        assert_eq!(format_request_date(date), "07/03/2020");
    }

    #[test]
    fn test_builder_defaults() {
        let config = ClientConfig::new("demo.school.kiwi");
        assert_eq!(config.host, "demo.school.kiwi");
        assert!(config.https);
        assert_eq!(config.proxy, None);
        assert!(!config.debug);
        assert_eq!(config.timeout_secs, HTTP_TIMEOUT_SECS);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::builder("demo.school.kiwi")
            .https(false)
            .proxy("http://proxy.local:3128")
            .debug(true)
            .timeout_secs(5)
            .build();
        assert!(!config.https);
        assert_eq!(config.proxy.as_deref(), Some("http://proxy.local:3128"));
        assert!(config.debug);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(
            config.endpoint().unwrap().as_str(),
            "http://demo.school.kiwi/api/api.php"
        );
    }

    #[test]
    fn test_from_lookup_requires_host() {
        let err = ClientConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, NoticesError::Config(_)));
        assert!(err.to_string().contains("KAMAR_HOST"));
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config =
            ClientConfig::from_lookup(lookup_from(&[("KAMAR_HOST", "demo.school.kiwi")])).unwrap();
        assert_eq!(config, ClientConfig::new("demo.school.kiwi"));
    }

    #[test]
    fn test_from_lookup_all_values() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("KAMAR_HOST", "demo.school.kiwi"),
            ("KAMAR_HTTPS", "false"),
            ("KAMAR_PROXY", "socks5://127.0.0.1:1080"),
            ("KAMAR_DEBUG", "1"),
            ("KAMAR_TIMEOUT_SECS", "10"),
        ]))
        .unwrap();
        assert!(!config.https);
        assert_eq!(config.proxy.as_deref(), Some("socks5://127.0.0.1:1080"));
        assert!(config.debug);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_from_lookup_rejects_bad_flag() {
        let err = ClientConfig::from_lookup(lookup_from(&[
            ("KAMAR_HOST", "demo.school.kiwi"),
            ("KAMAR_DEBUG", "maybe"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("KAMAR_DEBUG"));
    }

    #[test]
    fn test_from_lookup_rejects_bad_timeout() {
        let err = ClientConfig::from_lookup(lookup_from(&[
            ("KAMAR_HOST", "demo.school.kiwi"),
            ("KAMAR_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(err.is_config());
    }
}
