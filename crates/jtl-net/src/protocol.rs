//! JTLTP wire format.
//!
//! Messages are plain ASCII with bracketed fields:
//!
//! ```text
//! JTLTP-GET=[<identifier>]
//! JTLTP-STATUS=[<code>] JTLTP-TYPE=[<type>] JTLTP=MSG=[<body>]
//! ```
//!
//! Fields are separated by whitespace. The body runs to the last `]` of the
//! message, so documents that contain brackets themselves survive the trip.

use std::fmt;

/// Prefix that opens a request.
pub const GET_PREFIX: &str = "JTLTP-GET=[";
const STATUS_PREFIX: &str = "JTLTP-STATUS=[";
const TYPE_PREFIX: &str = "JTLTP-TYPE=[";
const MESSAGE_PREFIX: &str = "JTLTP=MSG=[";

/// Status of a served document.
pub const STATUS_OK: u16 = 200;
/// Status of a rejected request.
pub const STATUS_BAD: u16 = 400;
/// Status of an unknown identifier.
pub const STATUS_NOT_FOUND: u16 = 404;

/// Type tag of JTL documents.
pub const JTL_TYPE: &str = "jtl";
/// Body of a not-found response.
pub const NOT_FOUND_BODY: &str = "Not Found";

/// A request for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// What the client asks for, e.g. `index` or `page2`.
    pub identifier: String,
}

impl Request {
    /// Request `identifier`.
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }

    /// Find a request in `message`. Anything before [`GET_PREFIX`] is skipped.
    ///
    /// Returns `None` if there is no request, it is unterminated, or the
    /// identifier is empty.
    #[must_use]
    pub fn parse(message: &str) -> Option<Self> {
        let start = message.find(GET_PREFIX)?;
        let (identifier, _) = message[start + GET_PREFIX.len()..].split_once(']')?;
        if identifier.is_empty() {
            return None;
        }
        Some(Self::new(identifier))
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{GET_PREFIX}{}]", self.identifier)
    }
}

/// A server's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status code; see [`STATUS_OK`], [`STATUS_BAD`], [`STATUS_NOT_FOUND`].
    pub status: u16,
    /// Document type tag, `[A-Za-z0-9_-]+`.
    pub doc_type: String,
    /// Payload.
    pub body: String,
}

impl Response {
    /// Build a response from its three fields.
    #[must_use]
    pub fn new(status: u16, doc_type: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            doc_type: doc_type.into(),
            body: body.into(),
        }
    }

    /// A `200` response.
    #[must_use]
    pub fn ok(doc_type: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(STATUS_OK, doc_type, body)
    }

    /// A `400` response.
    #[must_use]
    pub fn bad(doc_type: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(STATUS_BAD, doc_type, body)
    }

    /// The fixed `404`/`jtl`/`Not Found` response.
    #[must_use]
    pub fn not_found() -> Self {
        Self::new(STATUS_NOT_FOUND, JTL_TYPE, NOT_FOUND_BODY)
    }

    /// Whether the status is `200`.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Parse a response. Leading text before the status field is skipped;
    /// anything else that does not match the format yields `None`.
    #[must_use]
    pub fn parse(message: &str) -> Option<Self> {
        let start = message.find(STATUS_PREFIX)?;
        let (status, rest) = bracketed(&message[start..], STATUS_PREFIX)?;
        if status.is_empty() || !status.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let status = status.parse().ok()?;

        let (doc_type, rest) = bracketed(separator(rest)?, TYPE_PREFIX)?;
        if doc_type.is_empty()
            || !doc_type
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
        {
            return None;
        }

        let rest = separator(rest)?.strip_prefix(MESSAGE_PREFIX)?;
        let end = rest.rfind(']')?;
        Some(Self::new(status, doc_type, &rest[..end]))
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{STATUS_PREFIX}{}] {TYPE_PREFIX}{}] {MESSAGE_PREFIX}{}]",
            self.status, self.doc_type, self.body
        )
    }
}

/// Split `prefix<field>]rest` into `(field, rest)`.
fn bracketed<'a>(input: &'a str, prefix: &str) -> Option<(&'a str, &'a str)> {
    input.strip_prefix(prefix)?.split_once(']')
}

/// At least one whitespace character, then the rest.
fn separator(input: &str) -> Option<&str> {
    input.strip_prefix(char::is_whitespace).map(str::trim_start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_request_wire_form() {
        assert_eq!(Request::new("index").to_string(), "JTLTP-GET=[index]");
    }

    #[test]
    fn test_request_parse_skips_noise() {
        assert_eq!(
            Request::parse("hello JTLTP-GET=[page2] trailing"),
            Some(Request::new("page2"))
        );
        assert_eq!(Request::parse("JTLTP-GET=[]"), None);
        assert_eq!(Request::parse("JTLTP-GET=[open"), None);
        assert_eq!(Request::parse("GET /index"), None);
    }

    #[test]
    fn test_response_wire_form() {
        assert_eq!(
            Response::not_found().to_string(),
            "JTLTP-STATUS=[404] JTLTP-TYPE=[jtl] JTLTP=MSG=[Not Found]"
        );
        assert_eq!(
            Response::ok("jtl", "doc").to_string(),
            "JTLTP-STATUS=[200] JTLTP-TYPE=[jtl] JTLTP=MSG=[doc]"
        );
    }

    #[test]
    fn test_response_parse() {
        let response =
            Response::parse("JTLTP-STATUS=[200]   JTLTP-TYPE=[jtl_v2] JTLTP=MSG=[test document]")
                .unwrap();
        assert_eq!(response, Response::ok("jtl_v2", "test document"));
        assert!(response.is_ok());
    }

    #[test]
    fn test_response_body_keeps_inner_brackets() {
        let response =
            Response::parse(r#"JTLTP-STATUS=[200] JTLTP-TYPE=[jtl] JTLTP=MSG=[[{"KEY":"p"}]]"#)
                .unwrap();
        assert_eq!(response.body, r#"[{"KEY":"p"}]"#);
    }

    #[test]
    fn test_response_body_may_be_empty() {
        let response = Response::parse("JTLTP-STATUS=[200] JTLTP-TYPE=[jtl] JTLTP=MSG=[]").unwrap();
        assert_eq!(response, Response::ok("jtl", ""));
        assert_eq!(Response::ok("jtl", "").to_string(), "JTLTP-STATUS=[200] JTLTP-TYPE=[jtl] JTLTP=MSG=[]");
    }

    #[test]
    fn test_response_parse_rejects_malformed() {
        for message in [
            "",
            "garbage",
            "JTLTP-STATUS=[ok] JTLTP-TYPE=[jtl] JTLTP=MSG=[x]",
            "JTLTP-STATUS=[99999] JTLTP-TYPE=[jtl] JTLTP=MSG=[x]",
            "JTLTP-STATUS=[200]JTLTP-TYPE=[jtl] JTLTP=MSG=[x]",
            "JTLTP-STATUS=[200] JTLTP-TYPE=[j t l] JTLTP=MSG=[x]",
            "JTLTP-STATUS=[200] JTLTP-TYPE=[] JTLTP=MSG=[x]",
            "JTLTP-STATUS=[200] JTLTP-TYPE=[jtl] JTLTP=MSG=[x",
            "JTLTP-STATUS=[200] JTLTP-TYPE=[jtl]",
        ] {
            assert_eq!(Response::parse(message), None, "{message}");
        }
    }

    #[quickcheck]
    #[allow(clippy::needless_pass_by_value)]
    fn prop_parsing_arbitrary_text_never_panics(message: String) -> bool {
        let _ = Response::parse(&message);
        let _ = Request::parse(&message);
        true
    }
}
