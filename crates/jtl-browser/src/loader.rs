//! Page locations, page text and script sources.
//!
//! A page lives in a local file, at an `http(s)` URL, or on a JTLTP server
//! (`jtltp://host:port/identifier`). Script `src` attributes resolve
//! against the page's own location.

use std::fmt;
use std::path::PathBuf;

use jtl_common::net::fetch_text;
use jtl_common::path::{is_remote, resolve_relative_to_page, resolve_relative_to_url};
use jtl_dom::{ElementRecord, keys};
use jtl_net::{Client, Fetcher};

use crate::config::EngineConfig;
use crate::error::LoadError;

/// URL scheme of pages served over JTLTP.
const JTLTP_SCHEME: &str = "jtltp://";

/// Identifier requested when a `jtltp://` location names none.
const DEFAULT_IDENTIFIER: &str = "index";

/// Tag of script elements.
pub const SCRIPT_TAG: &str = "script";

/// Where a page came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLocation {
    /// A local file.
    File(PathBuf),
    /// An `http://` or `https://` URL.
    Http(String),
    /// A document on a JTLTP server.
    Jtltp {
        /// `host:port` of the server.
        address: String,
        /// Document identifier.
        identifier: String,
    },
    /// Page text handed over directly; relative sources resolve against the
    /// current directory.
    Inline,
}

impl PageLocation {
    /// Classify a location string.
    #[must_use]
    pub fn parse(location: &str) -> Self {
        if let Some(rest) = location.strip_prefix(JTLTP_SCHEME) {
            let (address, identifier) = rest.split_once('/').unwrap_or((rest, ""));
            let identifier = if identifier.is_empty() {
                DEFAULT_IDENTIFIER
            } else {
                identifier
            };
            Self::Jtltp {
                address: address.to_string(),
                identifier: identifier.to_string(),
            }
        } else if is_remote(location) {
            Self::Http(location.to_string())
        } else {
            Self::File(PathBuf::from(location))
        }
    }

    /// The JTLTP server this page came from, if any.
    #[must_use]
    pub fn site_address(&self) -> Option<&str> {
        match self {
            Self::Jtltp { address, .. } => Some(address),
            _ => None,
        }
    }

    /// Read the page text.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the page cannot be read or fetched. Inline
    /// locations have no text of their own and read as an empty page.
    pub fn read(&self, config: &EngineConfig) -> Result<String, LoadError> {
        match self {
            Self::File(path) => std::fs::read_to_string(path).map_err(|source| LoadError::Read {
                path: path.clone(),
                source,
            }),
            Self::Http(url) => Ok(fetch_text(url)?),
            Self::Jtltp {
                address,
                identifier,
            } => fetch_document(address, identifier, config),
            Self::Inline => Ok("[]".to_string()),
        }
    }

    /// Read a resource referenced by `src`, relative to this page.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the resource cannot be read or fetched.
    pub fn read_resource(&self, src: &str, config: &EngineConfig) -> Result<String, LoadError> {
        match self {
            Self::File(page) => Self::File(resolve_relative_to_page(page, src)).read(config),
            Self::Http(url) => Self::Http(resolve_relative_to_url(url, src)).read(config),
            Self::Jtltp { address, .. } => fetch_document(address, src, config),
            Self::Inline => Self::File(PathBuf::from(src)).read(config),
        }
    }
}

impl fmt::Display for PageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Http(url) => f.write_str(url),
            Self::Jtltp {
                address,
                identifier,
            } => write!(f, "{JTLTP_SCHEME}{address}/{identifier}"),
            Self::Inline => f.write_str("<inline>"),
        }
    }
}

fn fetch_document(address: &str, identifier: &str, config: &EngineConfig) -> Result<String, LoadError> {
    let response = Client::new(address)
        .with_timeout(config.site.timeout())
        .fetch(identifier)?;
    if !response.is_ok() {
        return Err(LoadError::NotServed {
            identifier: identifier.to_string(),
            status: response.status,
            body: response.body,
        });
    }
    Ok(response.body)
}

/// Concatenate the page's scripts in document order, one per line.
///
/// A `script` element contributes its `Contents`, or, when that is empty,
/// the resource named by its `src`. Unreadable sources are logged and
/// contribute nothing.
#[must_use]
pub fn extract_scripts(records: &[ElementRecord], location: &PageLocation, config: &EngineConfig) -> String {
    let mut scripts = String::new();
    for record in records.iter().filter(|record| record.tag() == Some(SCRIPT_TAG)) {
        let contents = record.contents();
        if !contents.is_empty() && contents != "\n" {
            scripts.push_str(contents);
            scripts.push('\n');
        } else if let Some(src) = record.get_str(keys::SRC) {
            match location.read_resource(src, config) {
                Ok(source) => {
                    tracing::debug!(src, "loaded script source");
                    scripts.push_str(&source);
                    scripts.push('\n');
                }
                Err(e) => tracing::error!(src, error = %e, "cannot load script source"),
            }
        }
    }
    scripts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_locations() {
        assert_eq!(
            PageLocation::parse("pages/index.json"),
            PageLocation::File(PathBuf::from("pages/index.json"))
        );
        assert_eq!(
            PageLocation::parse("https://example.com/page.json"),
            PageLocation::Http("https://example.com/page.json".to_string())
        );
        assert_eq!(
            PageLocation::parse("jtltp://127.0.0.1:7070/page2"),
            PageLocation::Jtltp {
                address: "127.0.0.1:7070".to_string(),
                identifier: "page2".to_string(),
            }
        );
        let bare = PageLocation::parse("jtltp://127.0.0.1:7070");
        assert_eq!(bare.site_address(), Some("127.0.0.1:7070"));
        assert_eq!(bare.to_string(), "jtltp://127.0.0.1:7070/index");
    }

    #[test]
    fn inline_contents_are_joined_in_order() {
        let records = vec![
            ElementRecord::with_tag(SCRIPT_TAG).with(keys::CONTENTS, "let a = 1;"),
            ElementRecord::with_tag("p").with(keys::CONTENTS, "not a script"),
            ElementRecord::with_tag(SCRIPT_TAG).with(keys::CONTENTS, "\n"),
            ElementRecord::with_tag(SCRIPT_TAG).with(keys::CONTENTS, "let b = 2;"),
        ];
        let scripts = extract_scripts(&records, &PageLocation::Inline, &EngineConfig::default());
        assert_eq!(scripts, "let a = 1;\nlet b = 2;\n");
    }

    #[test]
    fn unreadable_src_contributes_nothing() {
        let records = vec![
            ElementRecord::with_tag(SCRIPT_TAG).with(keys::SRC, "missing.js"),
            ElementRecord::with_tag(SCRIPT_TAG).with(keys::CONTENTS, "ok();"),
        ];
        let location = PageLocation::File(PathBuf::from("/nonexistent/dir/page.json"));
        let scripts = extract_scripts(&records, &location, &EngineConfig::default());
        assert_eq!(scripts, "ok();\n");
    }
}
