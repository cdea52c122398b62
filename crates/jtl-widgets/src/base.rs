//! Fields shared by every widget kind.

use std::collections::BTreeMap;

use jtl_css::{ColorValue, HasColor, HasGeometry, MarginEdge, StyleMap, Viewport};
use jtl_dom::Selector;

use crate::input::{EventKind, FiredEvent};

/// An axis-aligned rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Build a rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Is the point inside? The right and bottom edges are exclusive.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// This rectangle moved to the middle of the viewport.
    #[must_use]
    pub fn centered_in(&self, viewport: Viewport) -> Self {
        Self {
            x: (viewport.width - self.width) / 2.0,
            y: (viewport.height - self.height) / 2.0,
            ..*self
        }
    }
}

/// Margin declarations, one slot per edge.
///
/// Each declaration overwrites its own slot, so applying the same style twice
/// gives the same result as applying it once.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Margins {
    /// `margin` / `padding`
    pub all: f32,
    /// `margin-left`
    pub left: f32,
    /// `margin-right`
    pub right: f32,
    /// `margin-up`
    pub up: f32,
    /// `margin-down`
    pub down: f32,
}

impl Margins {
    /// Store one declaration.
    pub const fn set(&mut self, edge: MarginEdge, pixels: f32) {
        match edge {
            MarginEdge::All => self.all = pixels,
            MarginEdge::Left => self.left = pixels,
            MarginEdge::Right => self.right = pixels,
            MarginEdge::Up => self.up = pixels,
            MarginEdge::Down => self.down = pixels,
        }
    }

    /// Positional offset for text: `margin` moves both axes, `margin-left`
    /// and `margin-up` add, `margin-right` and `margin-down` subtract.
    #[must_use]
    pub fn text_offset(&self) -> (f32, f32) {
        (
            self.all + self.left - self.right,
            self.all + self.up - self.down,
        )
    }
}

/// Common widget state.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetBase {
    /// Tag the widget was created for.
    pub tag: String,
    /// Left edge in viewport coordinates.
    pub x: f32,
    /// Top edge in viewport coordinates.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// Primary (fill or text) color.
    pub color: ColorValue,
    /// Border color.
    pub border_color: ColorValue,
    /// Font family name.
    pub font_family: String,
    /// `class` attribute.
    pub class: String,
    /// `id` attribute.
    pub id: String,
    /// Locally declared styles.
    pub style: StyleMap,
    /// Script source per event kind.
    pub event_handlers: BTreeMap<EventKind, String>,
    /// Rotation in degrees, applied at draw time.
    pub rotation: f32,
    /// Recenter in the viewport at draw time.
    pub center: bool,
    /// Margin declarations.
    pub margins: Margins,
    /// Pointer is over the widget.
    pub hovered: bool,
    /// Primary button was down inside the widget on the previous frame.
    pub was_pressed: bool,
}

impl WidgetBase {
    /// Create a base at a position with the given colors.
    #[must_use]
    pub fn new(
        tag: &str,
        frame: Rect,
        color: ColorValue,
        border_color: ColorValue,
        font_family: &str,
    ) -> Self {
        Self {
            tag: tag.to_string(),
            x: frame.x,
            y: frame.y,
            width: frame.width,
            height: frame.height,
            color,
            border_color,
            font_family: font_family.to_string(),
            class: String::new(),
            id: String::new(),
            style: StyleMap::new(),
            event_handlers: BTreeMap::new(),
            rotation: 0.0,
            center: false,
            margins: Margins::default(),
            hovered: false,
            was_pressed: false,
        }
    }

    /// Where the widget is drawn and hit-tested.
    #[must_use]
    pub fn rect(&self, viewport: Viewport) -> Rect {
        let rect = Rect::new(self.x, self.y, self.width, self.height);
        if self.center {
            rect.centered_in(viewport)
        } else {
            rect
        }
    }

    /// Does the selector match this widget's tag, class or id?
    #[must_use]
    pub fn matches(&self, selector: &Selector) -> bool {
        selector.matches_parts(&self.tag, &self.class, &self.id)
    }

    /// Attach handler source for an event kind, replacing any previous one.
    pub fn set_event_handler(&mut self, kind: EventKind, source: &str) {
        let _ = self.event_handlers.insert(kind, source.to_string());
    }

    /// Handler source for an event kind.
    #[must_use]
    pub fn event_handler(&self, kind: EventKind) -> Option<&str> {
        self.event_handlers.get(&kind).map(String::as_str)
    }

    /// Queue the handler for `kind`, if one is attached.
    pub fn fire(&self, kind: EventKind, fired: &mut Vec<FiredEvent>) {
        if let Some(source) = self.event_handler(kind) {
            fired.push(FiredEvent {
                kind,
                source: source.to_string(),
            });
        }
    }

    /// Update hover and press state for this frame.
    ///
    /// `clickrepeat` fires on every frame the button is held inside;
    /// `click` fires only on the first such frame and re-arms once the
    /// button is released or the pointer leaves.
    pub fn track_pointer(&mut self, inside: bool, primary_down: bool, fired: &mut Vec<FiredEvent>) {
        self.hovered = inside;
        if inside && primary_down {
            self.fire(EventKind::ClickRepeat, fired);
            if !self.was_pressed {
                self.fire(EventKind::Click, fired);
                self.was_pressed = true;
            }
        } else {
            self.was_pressed = false;
        }
    }

    /// Held down inside this frame.
    #[must_use]
    pub const fn is_held(&self) -> bool {
        self.hovered && self.was_pressed
    }

    /// Copy pointer interaction state from the widget this one replaces.
    pub const fn carry_interaction_from(&mut self, previous: &Self) {
        self.hovered = previous.hovered;
        self.was_pressed = previous.was_pressed;
    }
}

impl HasGeometry for WidgetBase {
    fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    fn set_margin(&mut self, edge: MarginEdge, pixels: f32) {
        self.margins.set(edge, pixels);
    }

    fn set_center(&mut self, center: bool) {
        self.center = center;
    }

    fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
    }
}

impl HasColor for WidgetBase {
    fn set_color(&mut self, color: ColorValue) {
        self.color = color;
    }

    fn set_border_color(&mut self, color: ColorValue) {
        self.border_color = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> WidgetBase {
        WidgetBase::new(
            "button",
            Rect::new(20.0, 20.0, 200.0, 40.0),
            ColorValue::WHITE,
            ColorValue::BLACK,
            "DejaVuSans",
        )
    }

    #[test]
    fn click_is_edge_triggered_and_repeat_is_level_triggered() {
        let mut base = base();
        base.set_event_handler(EventKind::Click, "c()");
        base.set_event_handler(EventKind::ClickRepeat, "r()");

        let mut fired = Vec::new();
        base.track_pointer(true, true, &mut fired);
        base.track_pointer(true, true, &mut fired);
        let kinds: Vec<EventKind> = fired.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            [EventKind::ClickRepeat, EventKind::Click, EventKind::ClickRepeat]
        );

        fired.clear();
        base.track_pointer(true, false, &mut fired);
        base.track_pointer(true, true, &mut fired);
        assert!(fired.iter().any(|e| e.kind == EventKind::Click));
    }

    #[test]
    fn leaving_the_bounds_rearms_click() {
        let mut base = base();
        base.set_event_handler(EventKind::Click, "c()");
        let mut fired = Vec::new();
        base.track_pointer(true, true, &mut fired);
        base.track_pointer(false, true, &mut fired);
        base.track_pointer(true, true, &mut fired);
        assert_eq!(fired.len(), 2);
    }

    #[test]
    fn centered_rect_ignores_position() {
        let mut base = base();
        base.center = true;
        let rect = base.rect(Viewport::new(800.0, 600.0));
        assert!((rect.x - 300.0).abs() < f32::EPSILON);
        assert!((rect.y - 280.0).abs() < f32::EPSILON);
    }

    #[test]
    fn margins_are_stored_per_edge() {
        let mut margins = Margins::default();
        margins.set(MarginEdge::Left, 10.0);
        margins.set(MarginEdge::Down, 4.0);
        margins.set(MarginEdge::Left, 10.0);
        let (dx, dy) = margins.text_offset();
        assert!((dx - 10.0).abs() < f32::EPSILON);
        assert!((dy + 4.0).abs() < f32::EPSILON);
    }
}
