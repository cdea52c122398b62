//! JTLTP, the line-based fetch protocol JTL pages are served over.
//!
//! A client opens a stream connection, writes one request and reads one
//! response; the server closes the connection after answering.
//!
//! ```text
//! -> JTLTP-GET=[index]
//! <- JTLTP-STATUS=[200] JTLTP-TYPE=[jtl] JTLTP=MSG=[<document>]
//! ```
//!
//! - [`protocol`]: the wire format ([`Request`], [`Response`])
//! - [`client`]: [`fetch`] and the [`Fetcher`] seam the page session uses
//! - [`server`]: [`Server`] and the per-connection reply helpers

pub mod client;
pub mod error;
pub mod protocol;
pub mod server;

pub use client::{Client, Fetcher, fetch};
pub use error::FetchError;
pub use protocol::{Request, Response};
pub use server::{Connection, Server};
