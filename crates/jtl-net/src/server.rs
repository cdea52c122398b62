//! JTLTP server.
//!
//! One request per connection: accept, read the request, answer, close.
//! Every `send_*` method consumes the [`Connection`], which closes it.

use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream, ToSocketAddrs};

use crate::protocol::{GET_PREFIX, Request, Response};

/// Requests longer than this are abandoned.
const MAX_REQUEST_BYTES: usize = 64 * 1024;

/// A listening JTLTP server.
#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
}

impl Server {
    /// Listen on `address`. Port `0` picks a free port.
    ///
    /// # Errors
    ///
    /// Returns the socket error if the address cannot be bound.
    pub fn bind(address: impl ToSocketAddrs) -> io::Result<Self> {
        Ok(Self::from_listener(TcpListener::bind(address)?))
    }

    /// Serve on an existing listener.
    #[must_use]
    pub const fn from_listener(listener: TcpListener) -> Self {
        Self { listener }
    }

    /// The bound address.
    ///
    /// # Errors
    ///
    /// Returns the socket error if the address cannot be queried.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Wait for the next client.
    ///
    /// # Errors
    ///
    /// Returns the socket error if accepting fails.
    pub fn accept(&self) -> io::Result<Connection> {
        let (stream, peer) = self.listener.accept()?;
        tracing::debug!(%peer, "jtltp connection");
        Ok(Connection { stream, peer })
    }

    /// Accept one connection, read its request and answer it with `handler`.
    ///
    /// Returns the request that was answered, or `None` when the client sent
    /// no valid request.
    ///
    /// # Errors
    ///
    /// Returns the socket error if accepting, reading or answering fails.
    pub fn handle_next(
        &self,
        handler: impl FnOnce(&Request) -> Response,
    ) -> io::Result<Option<Request>> {
        let mut connection = self.accept()?;
        let Some(request) = connection.await_request()? else {
            return Ok(None);
        };
        let response = handler(&request);
        connection.respond(&response)?;
        Ok(Some(request))
    }

    /// Answer connections forever. Per-connection failures are logged and
    /// never stop the loop.
    pub fn serve(&self, mut handler: impl FnMut(&Request) -> Response) -> ! {
        loop {
            match self.handle_next(&mut handler) {
                Ok(Some(request)) => {
                    tracing::info!(identifier = %request.identifier, "served");
                }
                Ok(None) => tracing::debug!("connection closed without a request"),
                Err(e) => tracing::warn!(error = %e, "jtltp connection failed"),
            }
        }
    }
}

/// One accepted client.
#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
}

impl Connection {
    /// The client's address.
    #[must_use]
    pub const fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Read until a complete request arrives. Text before the request prefix
    /// is skipped.
    ///
    /// Returns `None` if the client closed the connection first or sent too
    /// much without a request. A request with an empty identifier is
    /// answered with not-found on the spot and also yields `None`.
    ///
    /// # Errors
    ///
    /// Returns the socket error if reading fails.
    pub fn await_request(&mut self) -> io::Result<Option<Request>> {
        let mut raw = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = match self.stream.read(&mut chunk) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if n == 0 {
                return Ok(None);
            }
            raw.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&raw);
            let complete = text
                .find(GET_PREFIX)
                .filter(|&start| text[start + GET_PREFIX.len()..].contains(']'));
            if let Some(start) = complete {
                if let Some(request) = Request::parse(&text[start..]) {
                    return Ok(Some(request));
                }
                tracing::warn!(peer = %self.peer, "empty jtltp request");
                self.write(&Response::not_found().to_string())?;
                return Ok(None);
            }
            if raw.len() >= MAX_REQUEST_BYTES {
                tracing::warn!(peer = %self.peer, "oversized jtltp request");
                return Ok(None);
            }
        }
    }

    /// Answer with `response` and close.
    ///
    /// # Errors
    ///
    /// Returns the socket error if writing fails.
    pub fn respond(mut self, response: &Response) -> io::Result<()> {
        self.write(&response.to_string())
    }

    /// Answer `200` with `body` of type `doc_type`.
    ///
    /// # Errors
    ///
    /// Returns the socket error if writing fails.
    pub fn send_good(self, body: &str, doc_type: &str) -> io::Result<()> {
        self.respond(&Response::ok(doc_type, body))
    }

    /// Answer `400` with `body` of type `doc_type`.
    ///
    /// # Errors
    ///
    /// Returns the socket error if writing fails.
    pub fn send_bad(self, body: &str, doc_type: &str) -> io::Result<()> {
        self.respond(&Response::bad(doc_type, body))
    }

    /// Answer `404`/`jtl`/`Not Found`.
    ///
    /// # Errors
    ///
    /// Returns the socket error if writing fails.
    pub fn send_not_found(self) -> io::Result<()> {
        self.respond(&Response::not_found())
    }

    /// Answer with an arbitrary status and type.
    ///
    /// # Errors
    ///
    /// Returns the socket error if writing fails.
    pub fn send_raw(self, status: u16, doc_type: &str, body: &str) -> io::Result<()> {
        self.respond(&Response::new(status, doc_type, body))
    }

    /// Write `message` as-is, without JTLTP framing, and close.
    ///
    /// # Errors
    ///
    /// Returns the socket error if writing fails.
    pub fn send_unframed(mut self, message: &str) -> io::Result<()> {
        self.write(message)
    }

    fn write(&mut self, message: &str) -> io::Result<()> {
        self.stream.write_all(message.as_bytes())?;
        self.stream.flush()?;
        // The client reads until EOF.
        let _ = self.stream.shutdown(Shutdown::Write);
        Ok(())
    }
}
