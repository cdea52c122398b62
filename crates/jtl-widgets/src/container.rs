//! Container: a bordered box around a nested vertical flow of children.

use std::any::Any;

use jtl_common::warning::warn_once;
use jtl_css::{
    ColorValue, HasChildren, HasColor, HasFont, HasGeometry, Stylable, StyleKey, StyleMap, Viewport,
    apply_style_map,
};
use jtl_dom::PARAGRAPH_TAG;

use crate::base::{Rect, WidgetBase};
use crate::display_list::{DisplayCommand, DisplayList};
use crate::factory::{ElementFactory, WidgetSeed};
use crate::input::{FiredEvent, InputState, KeyInput};
use crate::widget::{PaintContext, Widget, apply_seed_style};

/// Default border.
pub const CONTAINER_BORDER_COLOR: ColorValue = ColorValue::rgba(200, 200, 200, 255);

/// Space between the border and the children.
pub const CHILD_PADDING: f32 = 10.0;
/// Vertical gap between children.
pub const CHILD_GAP: f32 = 10.0;
/// Default child height.
pub const CHILD_HEIGHT: f32 = 40.0;

/// A container widget.
#[derive(Debug, Clone)]
pub struct Container {
    /// Shared fields.
    pub base: WidgetBase,
    /// Children in flow order.
    pub children: Vec<Box<dyn Widget>>,
}

impl Container {
    /// Build an empty white container.
    #[must_use]
    pub fn new(seed: &WidgetSeed) -> Self {
        Self {
            base: WidgetBase::new(
                "div",
                seed.frame,
                ColorValue::WHITE,
                CONTAINER_BORDER_COLOR,
                &seed.context.font_family,
            ),
            children: Vec::new(),
        }
    }

    /// Build the children from `records`, stacked inside the container.
    ///
    /// Without a declared `height`, the container grows to fit them.
    pub fn lay_out_children(&mut self, factory: &ElementFactory, seed: &WidgetSeed) {
        self.children.clear();
        let inner_width = (self.base.width - 2.0 * CHILD_PADDING).max(0.0);
        let mut y = self.base.y + CHILD_PADDING;

        for record in &seed.children {
            let tag = record.tag().unwrap_or(PARAGRAPH_TAG);
            let frame = Rect::new(self.base.x + CHILD_PADDING, y, inner_width, CHILD_HEIGHT);
            let child_seed = WidgetSeed::from_record(record, frame, seed.context.clone());
            let Some(child) = factory.create(tag, &child_seed) else {
                warn_once("factory", &format!("unknown tag '{tag}' inside container"));
                continue;
            };
            y += child.base().height + CHILD_GAP;
            self.children.push(child);
        }

        if !self.children.is_empty() && !self.base.style.contains_key(StyleKey::Height.as_ref()) {
            let needed = y - CHILD_GAP + CHILD_PADDING - self.base.y;
            self.base.height = self.base.height.max(needed);
        }
    }
}

pub(crate) fn construct(factory: &ElementFactory, seed: &WidgetSeed) -> Box<dyn Widget> {
    let mut container = Container::new(seed);
    apply_seed_style(&mut container, seed);
    container.lay_out_children(factory, seed);
    // Run again so text-relevant declarations reach the new children.
    apply_style_map(&mut container, seed.context.viewport);
    Box::new(container)
}

impl Widget for Container {
    fn kind(&self) -> &'static str {
        "container"
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
        list.push(DisplayCommand::FillRect {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            color: self.base.color,
            rotation: self.base.rotation,
        });
        list.push(DisplayCommand::StrokeRect {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            color: self.base.border_color,
            rotation: self.base.rotation,
        });
        for child in &self.children {
            child.paint(list, context);
        }
    }

    fn handle_pointer(&mut self, input: &InputState, viewport: Viewport, fired: &mut Vec<FiredEvent>) {
        let inside = self
            .base
            .rect(viewport)
            .contains(input.pointer_x, input.pointer_y);
        self.base.track_pointer(inside, input.primary_down, fired);
        for child in &mut self.children {
            child.handle_pointer(input, viewport, fired);
        }
    }

    fn handle_key(&mut self, key: KeyInput, fired: &mut Vec<FiredEvent>) -> bool {
        let mut consumed = false;
        for child in &mut self.children {
            consumed |= child.handle_key(key, fired);
        }
        consumed
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &self.children
    }

    fn carry_state_from(&mut self, previous: &dyn Widget) {
        self.base.carry_interaction_from(previous.base());
        for (child, old) in self.children.iter_mut().zip(previous.children()) {
            if child.base().tag == old.base().tag {
                child.carry_state_from(old.as_ref());
            }
        }
    }
}

impl HasFont for Container {
    fn set_font_family(&mut self, family: &str) {
        self.base.font_family = family.to_string();
    }

    // A container draws no text of its own; the size only flows to children.
    fn set_font_size(&mut self, _size: f32) {}
}

impl HasChildren for Container {
    fn for_each_child(&mut self, visit: &mut dyn FnMut(&mut dyn Stylable)) {
        for child in &mut self.children {
            visit(child.as_stylable());
        }
    }
}

impl Stylable for Container {
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

    fn as_children(&mut self) -> Option<&mut dyn HasChildren> {
        Some(self)
    }
}
