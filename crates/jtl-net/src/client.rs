//! JTLTP client.

use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use crate::error::FetchError;
use crate::protocol::{Request, Response};

/// Read timeout applied to every fetch unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Responses larger than this are cut off.
const MAX_RESPONSE_BYTES: usize = 16 * 1024 * 1024;

/// How much of a bad response an error keeps.
const ERROR_EXCERPT_CHARS: usize = 80;

/// Something that can fetch a document by identifier.
///
/// The page session talks to this trait so tests can substitute a canned
/// source for a live server.
pub trait Fetcher {
    /// Fetch `identifier`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the document cannot be retrieved.
    fn fetch(&self, identifier: &str) -> Result<Response, FetchError>;
}

/// A client bound to one server address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    address: String,
    timeout: Duration,
}

impl Client {
    /// Client for `address` (`host:port`) with the default timeout.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Use a different read timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The server address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    fn io_error(&self, source: io::Error) -> FetchError {
        if is_timeout(&source) {
            FetchError::Timeout {
                address: self.address.clone(),
                seconds: self.timeout.as_secs(),
            }
        } else {
            FetchError::Io {
                address: self.address.clone(),
                source,
            }
        }
    }

    /// Read until the server closes the connection. A timeout after some
    /// data has arrived ends the read instead of failing it.
    fn read_response(&self, stream: &mut TcpStream) -> Result<String, FetchError> {
        let mut raw = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            match stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    raw.extend_from_slice(&chunk[..n]);
                    if raw.len() >= MAX_RESPONSE_BYTES {
                        tracing::warn!(address = %self.address, "response truncated");
                        break;
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) if is_timeout(&e) && !raw.is_empty() => break,
                Err(e) => return Err(self.io_error(e)),
            }
        }
        Ok(String::from_utf8_lossy(&raw).into_owned())
    }
}

impl Fetcher for Client {
    fn fetch(&self, identifier: &str) -> Result<Response, FetchError> {
        let mut stream = TcpStream::connect(&self.address).map_err(|source| FetchError::Connect {
            address: self.address.clone(),
            source,
        })?;
        stream
            .set_read_timeout(Some(self.timeout))
            .map_err(|e| self.io_error(e))?;
        stream
            .set_write_timeout(Some(self.timeout))
            .map_err(|e| self.io_error(e))?;

        let request = Request::new(identifier);
        stream
            .write_all(request.to_string().as_bytes())
            .map_err(|e| self.io_error(e))?;

        let message = self.read_response(&mut stream)?;
        let response = Response::parse(&message).ok_or_else(|| FetchError::Protocol {
            address: self.address.clone(),
            response: message.chars().take(ERROR_EXCERPT_CHARS).collect(),
        })?;
        tracing::debug!(
            address = %self.address,
            identifier,
            status = response.status,
            doc_type = %response.doc_type,
            "fetched"
        );
        Ok(response)
    }
}

/// Fetch `identifier` from the server at `address` with the default timeout.
///
/// # Errors
///
/// Returns [`FetchError`] if the server is unreachable, does not answer
/// within the timeout, or answers with a malformed response.
pub fn fetch(address: &str, identifier: &str) -> Result<Response, FetchError> {
    Client::new(address).fetch(identifier)
}

fn is_timeout(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
    )
}
