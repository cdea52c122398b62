//! Single-line input field.

use std::any::Any;

use jtl_css::{
    ColorValue, HasColor, HasFont, HasGeometry, HasText, Stylable, StyleMap, Viewport,
};

use crate::base::WidgetBase;
use crate::display_list::{DisplayCommand, DisplayList};
use crate::factory::{ElementFactory, WidgetSeed};
use crate::input::{EventKind, FiredEvent, InputState, KeyInput};
use crate::widget::{PaintContext, Widget, apply_seed_style};

/// Default border.
pub const FIELD_BORDER_COLOR: ColorValue = ColorValue::rgba(100, 100, 100, 255);
/// Border while focused.
pub const FOCUS_BORDER_COLOR: ColorValue = ColorValue::rgba(255, 0, 0, 255);

const FOCUS_SHADE: f32 = 1.1;
const TEXT_INSET: f32 = 5.0;

/// An editable text field.
///
/// A press inside focuses it and a press outside unfocuses it. While focused
/// it takes printable ASCII, Backspace, Enter (fires `submit`) and Escape
/// (unfocus).
#[derive(Debug, Clone, PartialEq)]
pub struct TextField {
    /// Shared fields.
    pub base: WidgetBase,
    /// Current text.
    pub text: String,
    /// Font size in pixels.
    pub font_size: f32,
    /// Has keyboard focus.
    pub focused: bool,
    /// The text has been edited since the field was created.
    pub edited: bool,
}

impl TextField {
    /// Build a white field holding the seed's content.
    #[must_use]
    pub fn new(seed: &WidgetSeed) -> Self {
        Self {
            base: WidgetBase::new(
                "textfield",
                seed.frame,
                ColorValue::WHITE,
                FIELD_BORDER_COLOR,
                &seed.context.font_family,
            ),
            text: seed.content.clone(),
            font_size: seed.context.base_font_size,
            focused: false,
            edited: false,
        }
    }
}

pub(crate) fn construct(_factory: &ElementFactory, seed: &WidgetSeed) -> Box<dyn Widget> {
    let mut field = TextField::new(seed);
    apply_seed_style(&mut field, seed);
    Box::new(field)
}

impl Widget for TextField {
    fn kind(&self) -> &'static str {
        "textfield"
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
        let (fill, border) = if self.focused {
            (self.base.color.scaled(FOCUS_SHADE), FOCUS_BORDER_COLOR)
        } else {
            (self.base.color, self.base.border_color)
        };

        list.push(DisplayCommand::FillRect {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            color: fill,
            rotation,
        });
        list.push(DisplayCommand::StrokeRect {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            color: border,
            rotation,
        });

        if !self.text.is_empty() {
            let line_height = context.metrics.line_height(self.font_size);
            list.push(DisplayCommand::DrawText {
                x: rect.x + TEXT_INSET,
                y: rect.y + (rect.height - line_height) / 2.0,
                text: self.text.clone(),
                font_family: self.base.font_family.clone(),
                font_size: self.font_size,
                color: ColorValue::BLACK,
                rotation,
            });
        }
    }

    fn handle_pointer(&mut self, input: &InputState, viewport: Viewport, fired: &mut Vec<FiredEvent>) {
        let inside = self
            .base
            .rect(viewport)
            .contains(input.pointer_x, input.pointer_y);
        if input.primary_down {
            self.focused = inside;
        }
        self.base.track_pointer(inside, input.primary_down, fired);
    }

    fn handle_key(&mut self, key: KeyInput, fired: &mut Vec<FiredEvent>) -> bool {
        if !self.focused {
            return false;
        }
        match key {
            KeyInput::Escape => self.focused = false,
            KeyInput::Backspace => {
                if self.text.pop().is_some() {
                    self.edited = true;
                }
            }
            KeyInput::Enter => self.base.fire(EventKind::Submit, fired),
            KeyInput::Char(c) => {
                if (' '..='~').contains(&c) {
                    self.text.push(c);
                    self.edited = true;
                }
            }
        }
        true
    }

    fn live_text(&self) -> Option<&str> {
        Some(&self.text)
    }

    fn carry_state_from(&mut self, previous: &dyn Widget) {
        self.base.carry_interaction_from(previous.base());
        if let Some(previous) = previous.as_any().downcast_ref::<Self>() {
            self.focused = previous.focused;
            if previous.edited {
                self.text.clone_from(&previous.text);
                self.edited = true;
            }
        }
    }
}

impl HasFont for TextField {
    fn set_font_family(&mut self, family: &str) {
        self.base.font_family = family.to_string();
    }

    fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }
}

impl HasText for TextField {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }
}

impl Stylable for TextField {
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
