//! Element factory: tag name to widget constructor.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use jtl_css::{StyleMap, Viewport};
use jtl_dom::ElementRecord;

use crate::base::Rect;
use crate::widget::Widget;
use crate::{button, container, text, text_field};

/// Builds a widget from a seed. Receives the factory so containers can build
/// their children.
pub type Constructor = Arc<dyn Fn(&ElementFactory, &WidgetSeed) -> Box<dyn Widget> + Send + Sync>;

/// Page-wide defaults every seed carries.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedContext {
    /// Viewport that percentages resolve against.
    pub viewport: Viewport,
    /// Base font size for labels and input text.
    pub base_font_size: f32,
    /// Font family used when no `font-family` is declared.
    pub font_family: String,
}

impl Default for SeedContext {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            base_font_size: 14.0,
            font_family: "DejaVuSans".to_string(),
        }
    }
}

/// Everything a constructor needs to build a widget.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetSeed {
    /// Text payload.
    pub content: String,
    /// Default placement and size; styles may override the size.
    pub frame: Rect,
    /// Parsed `style` attribute.
    pub style: StyleMap,
    /// `class` attribute.
    pub class: String,
    /// `id` attribute.
    pub id: String,
    /// Nested records, for containers.
    pub children: Vec<ElementRecord>,
    /// Page-wide defaults.
    pub context: SeedContext,
}

impl WidgetSeed {
    /// Seed with content and placement only.
    #[must_use]
    pub fn new(content: &str, frame: Rect, context: SeedContext) -> Self {
        Self {
            content: content.to_string(),
            frame,
            style: StyleMap::new(),
            class: String::new(),
            id: String::new(),
            children: Vec::new(),
            context,
        }
    }

    /// Seed for a record placed at `frame`.
    #[must_use]
    pub fn from_record(record: &ElementRecord, frame: Rect, context: SeedContext) -> Self {
        Self {
            content: record.contents().to_string(),
            frame,
            style: StyleMap::parse(record.style()),
            class: record.class().unwrap_or_default().to_string(),
            id: record.id().unwrap_or_default().to_string(),
            children: record.children().to_vec(),
            context,
        }
    }
}

/// Registry of widget constructors keyed by tag.
#[derive(Clone)]
pub struct ElementFactory {
    constructors: HashMap<String, Constructor>,
}

impl ElementFactory {
    /// A factory with no tags registered.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// A factory with the built-in tags: `button`, `p`/`text`,
    /// `textfield`/`input` and `div`/`container`.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut factory = Self::empty();
        factory.register("button", button::construct);
        factory.register("p", text::construct);
        factory.register("text", text::construct);
        factory.register("textfield", text_field::construct);
        factory.register("input", text_field::construct);
        factory.register("div", container::construct);
        factory.register("container", container::construct);
        factory
    }

    /// Add or replace the constructor for `tag`.
    pub fn register<F>(&mut self, tag: &str, constructor: F)
    where
        F: Fn(&Self, &WidgetSeed) -> Box<dyn Widget> + Send + Sync + 'static,
    {
        let _ = self.constructors.insert(tag.to_string(), Arc::new(constructor));
    }

    /// Build a widget for `tag`, or `None` if the tag is unknown.
    #[must_use]
    pub fn create(&self, tag: &str, seed: &WidgetSeed) -> Option<Box<dyn Widget>> {
        let constructor = self.constructors.get(tag)?;
        let mut widget = constructor(self, seed);
        widget.base_mut().tag = tag.to_string();
        Some(widget)
    }

    /// Is `tag` registered?
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.constructors.contains_key(tag)
    }

    /// Registered tags, sorted.
    #[must_use]
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}

impl Default for ElementFactory {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for ElementFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementFactory")
            .field("tags", &self.tags())
            .finish()
    }
}
