//! Element records.
//!
//! An element record is what the markup parser produces for one element: an
//! attribute map whose `KEY` entry names the tag. Values are strings, numbers,
//! booleans, nested records, or lists of records (`children`).

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Reserved attribute names.
pub mod keys {
    /// Tag name of the element.
    pub const KEY: &str = "KEY";
    /// Text payload.
    pub const CONTENTS: &str = "Contents";
    /// Class name used by `.class` selectors.
    pub const CLASS: &str = "class";
    /// Identifier used by `#id` selectors.
    pub const ID: &str = "id";
    /// Inline style declarations (`key:value;key:value`).
    pub const STYLE: &str = "style";
    /// Ordered list of nested records.
    pub const CHILDREN: &str = "children";
    /// External script source, relative to the page.
    pub const SRC: &str = "src";
    /// Script-side alias for [`CONTENTS`].
    pub const TEXT: &str = "text";
}

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Boolean flag.
    Bool(bool),
    /// Numeric value. Integers from the markup are stored as `f64`.
    Number(f64),
    /// Text value.
    Str(String),
    /// Ordered list of nested records (used by `children`).
    List(Vec<ElementRecord>),
    /// Nested record.
    Record(ElementRecord),
}

impl AttrValue {
    /// Returns the string payload if this is a [`AttrValue::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the records if this is a [`AttrValue::List`].
    #[must_use]
    pub fn as_list(&self) -> Option<&[ElementRecord]> {
        match self {
            Self::List(records) => Some(records),
            _ => None,
        }
    }
}

/// String coercion used for attribute comparisons.
///
/// Whole numbers print without a fractional part so that a record holding
/// `3.0` matches the query value `"3"`.
impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            #[allow(clippy::cast_possible_truncation)]
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
            Self::List(records) => {
                f.write_str("[")?;
                for (i, record) in records.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{record}")?;
                }
                f.write_str("]")
            }
            Self::Record(record) => write!(f, "{record}"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<ElementRecord> for AttrValue {
    fn from(value: ElementRecord) -> Self {
        Self::Record(value)
    }
}

impl From<Vec<ElementRecord>> for AttrValue {
    fn from(value: Vec<ElementRecord>) -> Self {
        Self::List(value)
    }
}

/// An insertion-ordered attribute map describing one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementRecord {
    attrs: Vec<(String, AttrValue)>,
}

impl ElementRecord {
    /// Create an empty record (no tag).
    #[must_use]
    pub const fn new() -> Self {
        Self { attrs: Vec::new() }
    }

    /// Create a record with the given tag.
    #[must_use]
    pub fn with_tag(tag: &str) -> Self {
        Self::new().with(keys::KEY, tag)
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<AttrValue>) -> Self {
        let _ = self.set(key, value);
        self
    }

    /// Set an attribute, keeping its original position if it already exists.
    ///
    /// Returns the previous value.
    pub fn set(&mut self, key: &str, value: impl Into<AttrValue>) -> Option<AttrValue> {
        let value = value.into();
        if let Some(slot) = self.attrs.iter_mut().find(|(name, _)| name == key) {
            return Some(std::mem::replace(&mut slot.1, value));
        }
        self.attrs.push((key.to_string(), value));
        None
    }

    /// Get an attribute value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.attrs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Get an attribute only if it holds a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(AttrValue::as_str)
    }

    /// Remove an attribute, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        let index = self.attrs.iter().position(|(name, _)| name == key)?;
        Some(self.attrs.remove(index).1)
    }

    /// Returns true if the attribute is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.attrs.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Returns true if the record has no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// The tag name (`KEY`), if set and non-empty.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.get_str(keys::KEY).filter(|tag| !tag.is_empty())
    }

    /// The text payload (`Contents`), or the empty string.
    #[must_use]
    pub fn contents(&self) -> &str {
        self.get_str(keys::CONTENTS).unwrap_or_default()
    }

    /// The inline style string, or the empty string.
    #[must_use]
    pub fn style(&self) -> &str {
        self.get_str(keys::STYLE).unwrap_or_default()
    }

    /// The `class` attribute.
    #[must_use]
    pub fn class(&self) -> Option<&str> {
        self.get_str(keys::CLASS)
    }

    /// The `id` attribute.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.get_str(keys::ID)
    }

    /// Nested child records, in order. Empty if `children` is absent or not a
    /// list.
    #[must_use]
    pub fn children(&self) -> &[ElementRecord] {
        self.get(keys::CHILDREN)
            .and_then(AttrValue::as_list)
            .unwrap_or_default()
    }

    /// String-coerced attribute comparison.
    ///
    /// Returns true when the attribute exists and its string form equals
    /// `value`.
    #[must_use]
    pub fn attribute_matches(&self, key: &str, value: &str) -> bool {
        self.get(key)
            .is_some_and(|attr| match attr {
                AttrValue::Str(s) => s == value,
                other => other.to_string() == value,
            })
    }

    /// Make the record storable: a missing or empty `KEY` becomes the
    /// paragraph tag and a script-side `text` field is moved onto `Contents`.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if let Some(text) = self.remove(keys::TEXT) {
            let _ = self.set(keys::CONTENTS, text.to_string());
        }
        if self.tag().is_none() {
            tracing::debug!("record without KEY, defaulting to '{}'", crate::PARAGRAPH_TAG);
            let _ = self.set(keys::KEY, crate::PARAGRAPH_TAG);
        }
        self
    }
}

impl fmt::Display for ElementRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.attrs.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}:{value}")?;
        }
        f.write_str("}")
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for ElementRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (key, value) in iter {
            let _ = record.set(&key.into(), value);
        }
        record
    }
}

impl Serialize for ElementRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.attrs.len()))?;
        for (name, value) in &self.attrs {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ElementRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = ElementRecord;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an element record object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut record = ElementRecord::new();
                while let Some((key, value)) = access.next_entry::<String, AttrValue>()? {
                    if record.set(&key, value).is_some() {
                        return Err(de::Error::custom(format!("duplicate attribute '{key}'")));
                    }
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}
