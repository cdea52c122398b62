//! Capability traits.
//!
//! A widget kind opts into the declarations it understands by implementing
//! some of these traits and returning itself from the matching accessor on
//! [`Stylable`]. The cascade never switches over concrete widget types, so a
//! widget registered at runtime is styled exactly like a built-in one.

use crate::declaration::StyleMap;
use crate::values::ColorValue;

/// Which margin declaration is being applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarginEdge {
    /// `margin` / `padding`: all edges.
    All,
    /// `margin-left`
    Left,
    /// `margin-right`
    Right,
    /// `margin-up`
    Up,
    /// `margin-down`
    Down,
}

/// Position, size and draw-time transforms.
pub trait HasGeometry {
    /// Set the width in pixels.
    fn set_width(&mut self, width: f32);
    /// Set the height in pixels.
    fn set_height(&mut self, height: f32);
    /// Apply a margin declaration; what a margin means is up to the kind.
    fn set_margin(&mut self, edge: MarginEdge, pixels: f32);
    /// Recenter in the viewport at draw time.
    fn set_center(&mut self, center: bool);
    /// Rotation in degrees, applied at draw time about the bounding box.
    fn set_rotation(&mut self, degrees: f32);
}

/// Primary and border colors.
pub trait HasColor {
    /// Set the primary (fill or text) color.
    fn set_color(&mut self, color: ColorValue);
    /// Set the border color. Kinds without a border ignore it.
    fn set_border_color(&mut self, color: ColorValue);
}

/// Font selection.
pub trait HasFont {
    /// Set the font family name. Resolving it to a font asset is the
    /// drawing layer's job.
    fn set_font_family(&mut self, family: &str);
    /// Set the font size in pixels.
    fn set_font_size(&mut self, size: f32);
}

/// Editable or displayed text.
pub trait HasText {
    /// The current text.
    fn text(&self) -> &str;
    /// Replace the text.
    fn set_text(&mut self, text: &str);
}

/// Nested children that receive propagated declarations.
pub trait HasChildren {
    /// Visit each direct child.
    fn for_each_child(&mut self, visit: &mut dyn FnMut(&mut dyn Stylable));
}

/// Anything the cascade can style.
pub trait Stylable {
    /// The declarations this widget carries explicitly.
    fn style_map(&self) -> &StyleMap;

    /// Store the `class` attribute.
    fn set_class(&mut self, class: &str);

    /// Store the `id` attribute.
    fn set_id(&mut self, id: &str);

    /// Geometry capability.
    fn as_geometry(&mut self) -> Option<&mut dyn HasGeometry> {
        None
    }

    /// Color capability.
    fn as_color(&mut self) -> Option<&mut dyn HasColor> {
        None
    }

    /// Font capability.
    fn as_font(&mut self) -> Option<&mut dyn HasFont> {
        None
    }

    /// Text capability.
    fn as_text(&mut self) -> Option<&mut dyn HasText> {
        None
    }

    /// Children capability.
    fn as_children(&mut self) -> Option<&mut dyn HasChildren> {
        None
    }
}
