//! Paragraph text.

use std::any::Any;

use jtl_css::{ColorValue, HasColor, HasFont, HasGeometry, HasText, Stylable, StyleMap};

use crate::base::WidgetBase;
use crate::display_list::{DisplayCommand, DisplayList};
use crate::factory::{ElementFactory, WidgetSeed};
use crate::widget::{PaintContext, Widget, apply_seed_style};

/// Drawn in place of empty content.
pub const PLACEHOLDER: &str = "Blank String...";

/// Font size relative to the height the flow assigns.
const FONT_SIZE_RATIO: f32 = 0.6;

/// A run of text.
///
/// Margins move the text rather than pad it: see
/// [`Margins::text_offset`](crate::base::Margins::text_offset).
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    /// Shared fields.
    pub base: WidgetBase,
    /// Text payload.
    pub content: String,
    /// Font size in pixels.
    pub font_size: f32,
}

impl Text {
    /// Build black text sized from the seed's height.
    #[must_use]
    pub fn new(seed: &WidgetSeed) -> Self {
        Self {
            base: WidgetBase::new(
                "p",
                seed.frame,
                ColorValue::BLACK,
                ColorValue::BLACK,
                &seed.context.font_family,
            ),
            content: seed.content.clone(),
            font_size: seed.frame.height * FONT_SIZE_RATIO,
        }
    }

    /// What gets drawn: the content, or the placeholder when it is empty.
    #[must_use]
    pub fn display_text(&self) -> &str {
        if self.content.is_empty() {
            PLACEHOLDER
        } else {
            &self.content
        }
    }
}

pub(crate) fn construct(_factory: &ElementFactory, seed: &WidgetSeed) -> Box<dyn Widget> {
    let mut text = Text::new(seed);
    apply_seed_style(&mut text, seed);
    Box::new(text)
}

impl Widget for Text {
    fn kind(&self) -> &'static str {
        "text"
    }

    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn clone_box(&self) -> Box<dyn Widget> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_stylable(&mut self) -> &mut dyn Stylable {
        self
    }

    fn paint(&self, list: &mut DisplayList, context: &PaintContext<'_>) {
        let shown = self.display_text();
        let (x, y) = if self.base.center {
            let width = context.metrics.text_width(shown, self.font_size);
            let height = context.metrics.line_height(self.font_size);
            (
                (context.viewport.width - width) / 2.0,
                (context.viewport.height - height) / 2.0,
            )
        } else {
            let (dx, dy) = self.base.margins.text_offset();
            (self.base.x + dx, self.base.y + dy)
        };

        list.push(DisplayCommand::DrawText {
            x,
            y,
            text: shown.to_string(),
            font_family: self.base.font_family.clone(),
            font_size: self.font_size,
            color: self.base.color,
            rotation: self.base.rotation,
        });
    }

    fn live_text(&self) -> Option<&str> {
        Some(&self.content)
    }
}

impl HasFont for Text {
    fn set_font_family(&mut self, family: &str) {
        self.base.font_family = family.to_string();
    }

    fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }
}

impl HasText for Text {
    fn text(&self) -> &str {
        &self.content
    }

    fn set_text(&mut self, text: &str) {
        self.content = text.to_string();
    }
}

impl Stylable for Text {
    fn style_map(&self) -> &StyleMap {
        &self.base.style
    }

    fn set_class(&mut self, class: &str) {
        self.base.class = class.to_string();
    }

    fn set_id(&mut self, id: &str) {
        self.base.id = id.to_string();
    }

    fn as_geometry(&mut self) -> Option<&mut dyn HasGeometry> {
        Some(&mut self.base)
    }

    fn as_color(&mut self) -> Option<&mut dyn HasColor> {
        Some(&mut self.base)
    }

    fn as_font(&mut self) -> Option<&mut dyn HasFont> {
        Some(self)
    }

    fn as_text(&mut self) -> Option<&mut dyn HasText> {
        Some(self)
    }
}
