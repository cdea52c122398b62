//! Markup parsing seam.
//!
//! The engine consumes element records; how page text becomes records is up
//! to a [`MarkupParser`]. [`JsonMarkup`] reads pages stored as a JSON array
//! of records:
//!
//! ```json
//! [
//!   { "KEY": "p", "Contents": "Hello" },
//!   { "KEY": "button", "Contents": "Go", "id": "go" }
//! ]
//! ```

use jtl_dom::ElementRecord;
use thiserror::Error;

/// Page text that could not be parsed.
#[derive(Debug, Error)]
#[error("invalid page markup: {message}")]
pub struct MarkupError {
    /// What the parser reported.
    pub message: String,
}

/// Turns page text into element records.
pub trait MarkupParser {
    /// Parse `source` into records, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`MarkupError`] if the text is not valid markup.
    fn parse(&self, source: &str) -> Result<Vec<ElementRecord>, MarkupError>;
}

/// Pages as a JSON array of records. A single top-level object is accepted
/// as a one-record page.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMarkup;

impl MarkupParser for JsonMarkup {
    fn parse(&self, source: &str) -> Result<Vec<ElementRecord>, MarkupError> {
        let invalid = |e: serde_json::Error| MarkupError {
            message: e.to_string(),
        };
        if source.trim_start().starts_with('{') {
            serde_json::from_str::<ElementRecord>(source)
                .map(|record| vec![record])
                .map_err(invalid)
        } else {
            serde_json::from_str(source).map_err(invalid)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jtl_dom::keys;

    #[test]
    fn parses_record_array_in_order() {
        let records = JsonMarkup
            .parse(r#"[{"KEY":"p","Contents":"a"},{"KEY":"button","id":"go"}]"#)
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get_str(keys::CONTENTS), Some("a"));
        assert_eq!(records[1].id(), Some("go"));
    }

    #[test]
    fn single_object_is_one_record() {
        let records = JsonMarkup.parse(r#"{"KEY":"p"}"#).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn rejects_non_records() {
        assert!(JsonMarkup.parse("not json").is_err());
        assert!(JsonMarkup.parse("[1, 2]").is_err());
    }
}
