//! Push button.

use std::any::Any;

use jtl_css::{
    ColorValue, HasColor, HasFont, HasGeometry, HasText, Stylable, StyleMap,
};

use crate::base::WidgetBase;
use crate::display_list::{DisplayCommand, DisplayList};
use crate::factory::{ElementFactory, WidgetSeed};
use crate::widget::{PaintContext, Widget, apply_seed_style};

/// Default fill.
pub const BUTTON_COLOR: ColorValue = ColorValue::rgba(200, 200, 200, 255);
/// Default border.
pub const BUTTON_BORDER_COLOR: ColorValue = ColorValue::rgba(100, 100, 100, 255);
/// Default inner margin around the label.
pub const BUTTON_INNER_MARGIN: f32 = 20.0;

const HOVER_SHADE: f32 = 1.2;
const PRESSED_SHADE: f32 = 0.8;

/// A labelled button. Lightens under the pointer and darkens while held.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    /// Shared fields.
    pub base: WidgetBase,
    /// Label.
    pub label: String,
    /// Label font size in pixels.
    pub font_size: f32,
}

impl Button {
    /// Build a button with the default colors and inner margin.
    #[must_use]
    pub fn new(seed: &WidgetSeed) -> Self {
        let mut base = WidgetBase::new(
            "button",
            seed.frame,
            BUTTON_COLOR,
            BUTTON_BORDER_COLOR,
            &seed.context.font_family,
        );
        base.margins.all = BUTTON_INNER_MARGIN;
        Self {
            base,
            label: seed.content.clone(),
            font_size: seed.context.base_font_size,
        }
    }

    /// Space kept between the label and the edges when it does not fit
    /// centered.
    #[must_use]
    pub const fn inner_margin(&self) -> f32 {
        self.base.margins.all
    }

    /// Fill color for the current interaction state.
    #[must_use]
    pub fn fill_color(&self) -> ColorValue {
        if self.base.is_held() {
            self.base.color.scaled(PRESSED_SHADE)
        } else if self.base.hovered {
            self.base.color.scaled(HOVER_SHADE)
        } else {
            self.base.color
        }
    }
}

pub(crate) fn construct(_factory: &ElementFactory, seed: &WidgetSeed) -> Box<dyn Widget> {
    let mut button = Button::new(seed);
    apply_seed_style(&mut button, seed);
    Box::new(button)
}

impl Widget for Button {
    fn kind(&self) -> &'static str {
        "button"
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
        let rect = self.base.rect(context.viewport);
        let rotation = self.base.rotation;

        list.push(DisplayCommand::FillRect {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            color: self.fill_color(),
            rotation,
        });
        list.push(DisplayCommand::StrokeRect {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            color: self.base.border_color,
            rotation,
        });

        let text_width = context.metrics.text_width(&self.label, self.font_size);
        let line_height = context.metrics.line_height(self.font_size);
        let margin = self.inner_margin().min(rect.width / 2.0);
        let x = if text_width + 2.0 * margin <= rect.width {
            rect.x + (rect.width - text_width) / 2.0
        } else {
            rect.x + margin
        };
        list.push(DisplayCommand::DrawText {
            x,
            y: rect.y + (rect.height - line_height) / 2.0,
            text: self.label.clone(),
            font_family: self.base.font_family.clone(),
            font_size: self.font_size,
            color: ColorValue::BLACK,
            rotation,
        });
    }

    fn live_text(&self) -> Option<&str> {
        Some(&self.label)
    }
}

impl HasFont for Button {
    fn set_font_family(&mut self, family: &str) {
        self.base.font_family = family.to_string();
    }

    fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }
}

impl HasText for Button {
    fn text(&self) -> &str {
        &self.label
    }

    fn set_text(&mut self, text: &str) {
        self.label = text.to_string();
    }
}

impl Stylable for Button {
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
