//! Page loading errors.

use std::path::PathBuf;

use jtl_common::net::NetError;
use jtl_js::ScriptError;
use jtl_net::FetchError;
use thiserror::Error;

use crate::markup::MarkupError;

/// Failure to open a page.
///
/// Only loading can fail; once a page is open, script and resource errors
/// are logged and the page keeps running.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A local page file could not be read.
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        /// Page path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// An `http(s)` page could not be fetched.
    #[error(transparent)]
    Http(#[from] NetError),
    /// A `jtltp://` page could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// The JTLTP server answered with something other than a document.
    #[error("'{identifier}' was not served: {status} {body}")]
    NotServed {
        /// Requested identifier.
        identifier: String,
        /// Response status.
        status: u16,
        /// Response body.
        body: String,
    },
    /// The page text is not valid markup.
    #[error(transparent)]
    Markup(#[from] MarkupError),
    /// The script host could not be set up.
    #[error("cannot start the script host: {0}")]
    Script(#[from] ScriptError),
}
