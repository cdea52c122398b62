//! HTTP fetch utilities for loading remote pages and script sources.
//!
//! Provides a simple blocking HTTP GET wrapper used by the page loader.

use std::time::Duration;

use thiserror::Error;

/// User-Agent header sent with all requests.
const USER_AGENT: &str = concat!("jtl/", env!("CARGO_PKG_VERSION"));

/// Default request timeout.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Failure while fetching a remote resource.
#[derive(Debug, Error)]
pub enum NetError {
    /// The HTTP client could not be built or the request failed.
    #[error("request to '{url}' failed: {source}")]
    Request {
        /// Requested URL.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("HTTP error {status} for '{url}'")]
    Status {
        /// Requested URL.
        url: String,
        /// Status code returned by the server.
        status: u16,
    },
}

/// Fetch a URL and return its body as text.
///
/// # Errors
///
/// Returns [`NetError`] if the HTTP client cannot be created, the request
/// fails, the response has a non-success status, or the body cannot be decoded.
pub fn fetch_text(url: &str) -> Result<String, NetError> {
    let request_error = |source| NetError::Request {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .map_err(request_error)?;

    let response = client.get(url).send().map_err(request_error)?;

    if !response.status().is_success() {
        return Err(NetError::Status {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    tracing::debug!(url, "fetched remote resource");
    response.text().map_err(request_error)
}
