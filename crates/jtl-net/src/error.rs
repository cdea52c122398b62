//! Fetch errors.

use std::io;

use thiserror::Error;

/// Failure of a JTLTP fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server could not be reached.
    #[error("could not connect to '{address}': {source}")]
    Connect {
        /// Server address.
        address: String,
        /// Underlying socket error.
        #[source]
        source: io::Error,
    },
    /// Nothing arrived before the read timeout.
    #[error("no response from '{address}' within {seconds}s")]
    Timeout {
        /// Server address.
        address: String,
        /// The timeout that elapsed.
        seconds: u64,
    },
    /// The connection failed mid-exchange.
    #[error("connection to '{address}' failed: {source}")]
    Io {
        /// Server address.
        address: String,
        /// Underlying socket error.
        #[source]
        source: io::Error,
    },
    /// The server answered with something that is not a JTLTP response.
    #[error("malformed response from '{address}': '{response}'")]
    Protocol {
        /// Server address.
        address: String,
        /// Start of what the server sent.
        response: String,
    },
}
