//! HTTP client wrapper for talking to a KAMAR portal.
//!
//! Requests are sent once. Failures are returned to the caller without retry.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::Proxy;
use url::form_urlencoded;
use url::Url;

use crate::config::{ClientConfig, API_KEY, COMMAND, USER_AGENT};
use crate::error::{NoticesError, Result};

/// Content type of the request body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Create a configured HTTP client.
///
/// Without a configured proxy the client connects directly, even when
/// `HTTP_PROXY`/`HTTPS_PROXY` are set in the environment.
pub fn create_client(config: &ClientConfig) -> Result<Client> {
    let mut builder = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(USER_AGENT);

    builder = match &config.proxy {
        Some(proxy) => {
            let proxy = Proxy::all(proxy.as_str()).map_err(|source| NoticesError::InvalidProxy {
                proxy: proxy.clone(),
                source,
            })?;
            builder.proxy(proxy)
        }
        None => builder.no_proxy(),
    };

    Ok(builder.build()?)
}

/// Encode the `GetNotices` form body for a request date.
///
/// # Examples
/// ```
/// use kamar_notices::http::request_body;
///
/// assert_eq!(
///     request_body("01/01/2020"),
///     "Key=vtku&Command=GetNotices&ShowAll=YES&Date=01%2F01%2F2020"
/// );
/// ```
pub fn request_body(date: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("Key", API_KEY)
        .append_pair("Command", COMMAND)
        .append_pair("ShowAll", "YES")
        .append_pair("Date", date)
        .finish()
}

/// POST a form body and return the response text.
///
/// Non-2xx statuses are reported as [`NoticesError::Http`]. A body that is
/// not valid UTF-8 is reported as [`NoticesError::Encoding`].
pub fn post_form(client: &Client, url: &Url, body: String) -> Result<String> {
    tracing::debug!(url = %url, "Sending notices request");

    let response = client
        .post(url.clone())
        .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
        .body(body)
        .send()?
        .error_for_status()?;

    tracing::debug!(status = %response.status(), "Received notices response");
    let bytes = response.bytes()?;
    Ok(std::str::from_utf8(&bytes)?.to_owned())
}
