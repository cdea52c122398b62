//! Parsing of inline style declarations.
//!
//! Syntax: `key:value;key:value;...`. Whitespace around keys and values is
//! ignored. A part without exactly one `:` is skipped; nothing here fails.

use std::fmt;
use std::str::FromStr;

use strum_macros::{AsRefStr, Display, EnumString};

/// Style keys the cascade understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum StyleKey {
    /// `width`
    Width,
    /// `height`
    Height,
    /// `color`
    Color,
    /// `border-color`
    BorderColor,
    /// `font-family`
    FontFamily,
    /// `font-size`
    FontSize,
    /// `margin`
    Margin,
    /// `padding`
    Padding,
    /// `margin-left`
    MarginLeft,
    /// `margin-right`
    MarginRight,
    /// `margin-up`
    MarginUp,
    /// `margin-down`
    MarginDown,
    /// `center`
    Center,
    /// `rotate`
    Rotate,
    /// `class`
    Class,
    /// `id`
    Id,
}

impl StyleKey {
    /// Keys that flow from a container to children that do not declare them.
    #[must_use]
    pub const fn is_text_relevant(self) -> bool {
        matches!(self, Self::FontFamily | Self::FontSize)
    }
}

/// One `key:value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Property name, trimmed.
    pub key: String,
    /// Raw value, trimmed.
    pub value: String,
}

impl Declaration {
    /// Build a declaration.
    #[must_use]
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.trim().to_string(),
            value: value.trim().to_string(),
        }
    }

    /// The recognized key, if any.
    #[must_use]
    pub fn style_key(&self) -> Option<StyleKey> {
        StyleKey::from_str(&self.key).ok()
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.value)
    }
}

/// Split a declaration string into its declarations, in order.
#[must_use]
pub fn parse_declarations(input: &str) -> Vec<Declaration> {
    input
        .split(';')
        .filter_map(|part| {
            let mut pieces = part.split(':');
            let (Some(key), Some(value), None) = (pieces.next(), pieces.next(), pieces.next()) else {
                return None;
            };
            let declaration = Declaration::new(key, value);
            (!declaration.key.is_empty()).then_some(declaration)
        })
        .collect()
}

/// Insertion-ordered map of a widget's explicit style declarations.
///
/// Later declarations for an existing key overwrite it in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    entries: Vec<Declaration>,
}

impl StyleMap {
    /// Create an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Parse a declaration string into a map.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut map = Self::new();
        map.extend(parse_declarations(input));
        map
    }

    /// Insert or overwrite one declaration.
    pub fn insert(&mut self, key: &str, value: &str) {
        let declaration = Declaration::new(key, value);
        match self.entries.iter_mut().find(|d| d.key == declaration.key) {
            Some(existing) => existing.value = declaration.value,
            None => self.entries.push(declaration),
        }
    }

    /// Value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|d| d.key == key)
            .map(|d| d.value.as_str())
    }

    /// Is `key` explicitly declared?
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove every declaration.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Declarations in order.
    #[must_use]
    pub fn declarations(&self) -> &[Declaration] {
        &self.entries
    }

    /// Number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Extend<Declaration> for StyleMap {
    fn extend<I: IntoIterator<Item = Declaration>>(&mut self, iter: I) {
        for declaration in iter {
            self.insert(&declaration.key, &declaration.value);
        }
    }
}

/// Serializes back to `key:value;key:value`.
impl fmt::Display for StyleMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, declaration) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{declaration}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_declarations_in_order() {
        let declarations = parse_declarations(" width: 100 ; color:1,2,3,4;;bogus; a:b:c ");
        let keys: Vec<&str> = declarations.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, ["width", "color"]);
        assert_eq!(declarations[0].value, "100");
    }

    #[test]
    fn recognizes_style_keys() {
        assert_eq!(Declaration::new("border-color", "x").style_key(), Some(StyleKey::BorderColor));
        assert_eq!(Declaration::new("margin-up", "1").style_key(), Some(StyleKey::MarginUp));
        assert_eq!(Declaration::new("shadow", "1").style_key(), None);
        assert_eq!(StyleKey::FontFamily.to_string(), "font-family");
    }

    #[test]
    fn style_map_overwrites_in_place() {
        let mut map = StyleMap::parse("width:10;height:20");
        map.insert("width", "30");
        assert_eq!(map.to_string(), "width:30;height:20");
        assert!(map.contains_key("height"));
        map.clear();
        assert!(map.is_empty());
    }
}
