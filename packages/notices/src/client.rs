//! Notices client that ties transport and parsing together.

use chrono::NaiveDate;
use reqwest::blocking::Client;
use url::Url;

use crate::config::{format_request_date, ClientConfig};
use crate::error::Result;
use crate::http::{create_client, post_form, request_body};
use crate::notices::Notices;
use crate::parser::parse_response;

/// Banner printed before a raw response in debug mode.
const RESPONSE_START: &str = " === START KAMAR RESPONSE ==== ";

/// Banner printed after a raw response in debug mode.
const RESPONSE_END: &str = " ===  END KAMAR RESPONSE  ==== ";

/// Client for the notices feed of one KAMAR portal.
///
/// # Example
///
/// ```no_run
/// use kamar_notices::{ClientConfig, NoticesClient};
///
/// let client = NoticesClient::new(&ClientConfig::new("demo.school.kiwi"))?;
/// let notices = client.retrieve("01/01/2020")?;
/// if let Some(message) = notices.error_message() {
///     eprintln!("KAMAR error: {message}");
/// }
/// for notice in notices.notices().unwrap_or_default() {
///     println!("[{}] {}", notice.level(), notice.subject());
/// }
/// # Ok::<(), kamar_notices::NoticesError>(())
/// ```
#[derive(Debug, Clone)]
pub struct NoticesClient {
    http: Client,
    endpoint: Url,
    debug: bool,
}

impl NoticesClient {
    /// Build a client from configuration.
    ///
    /// Fails with a configuration error when the host does not form a valid
    /// endpoint URL or the proxy is rejected.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let endpoint = config.endpoint()?;
        let http = create_client(config)?;
        Ok(Self {
            http,
            endpoint,
            debug: config.debug,
        })
    }

    /// Client for `host` with the default configuration (HTTPS, no proxy).
    pub fn from_host(host: &str) -> Result<Self> {
        Self::new(&ClientConfig::new(host))
    }

    /// The endpoint requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Retrieve the notices for today's local date.
    pub fn retrieve_today(&self) -> Result<Notices> {
        self.retrieve_date(chrono::Local::now().date_naive())
    }

    /// Retrieve the notices for a calendar date.
    pub fn retrieve_date(&self, date: NaiveDate) -> Result<Notices> {
        self.retrieve(&format_request_date(date))
    }

    /// Retrieve the notices for a date in DD/MM/YYYY form.
    ///
    /// The date is sent as-is. A portal `<Error>` yields `Ok` with
    /// [`Notices::error_message`] set; transport and XML failures yield `Err`.
    pub fn retrieve(&self, date: &str) -> Result<Notices> {
        let raw = post_form(&self.http, &self.endpoint, request_body(date))?;

        if self.debug {
            let captured = capture_response(&raw);
            tracing::info!("{RESPONSE_START}\n{captured}\n{RESPONSE_END}");
            return parse_response(&captured, date);
        }

        parse_response(&raw, date)
    }
}

/// Normalize a response for display: lines trimmed and blank lines dropped.
fn capture_response(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
