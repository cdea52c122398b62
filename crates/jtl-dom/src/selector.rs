//! Selector strings used by scripts to address records and widgets.
//!
//! The grammar is deliberately tiny: a leading `.` selects by class, a leading
//! `#` selects by id, anything else is a tag name.

use std::fmt;
use std::str::FromStr;

use crate::record::{ElementRecord, keys};

/// A parsed selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// `.name` - matches the `class` attribute.
    Class(String),
    /// `#name` - matches the `id` attribute.
    Id(String),
    /// `name` - matches the tag (`KEY`).
    Tag(String),
}

impl Selector {
    /// Parse a selector string. Never fails: unprefixed input is a tag.
    #[must_use]
    pub fn parse(selector: &str) -> Self {
        if let Some(class) = selector.strip_prefix('.') {
            Self::Class(class.to_string())
        } else if let Some(id) = selector.strip_prefix('#') {
            Self::Id(id.to_string())
        } else {
            Self::Tag(selector.to_string())
        }
    }

    /// The record attribute this selector compares against.
    #[must_use]
    pub const fn attribute(&self) -> &'static str {
        match self {
            Self::Class(_) => keys::CLASS,
            Self::Id(_) => keys::ID,
            Self::Tag(_) => keys::KEY,
        }
    }

    /// The value compared against [`attribute`](Self::attribute).
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Class(value) | Self::Id(value) | Self::Tag(value) => value,
        }
    }

    /// Does the record match?
    #[must_use]
    pub fn matches(&self, record: &ElementRecord) -> bool {
        record.attribute_matches(self.attribute(), self.value())
    }

    /// Match against already-extracted identity fields (used for widgets).
    #[must_use]
    pub fn matches_parts(&self, tag: &str, class: &str, id: &str) -> bool {
        match self {
            Self::Class(value) => !class.is_empty() && class == value,
            Self::Id(value) => !id.is_empty() && id == value,
            Self::Tag(value) => tag == value,
        }
    }
}

impl FromStr for Selector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(value) => write!(f, ".{value}"),
            Self::Id(value) => write!(f, "#{value}"),
            Self::Tag(value) => f.write_str(value),
        }
    }
}
