//! Typed widgets for the JTL engine.
//!
//! Each element record is projected into a [`Widget`]: a button, a run of
//! text, an input field or a container. Widgets paint into a
//! [`DisplayList`], hit-test pointer input and fire script handlers; they
//! take styles through the capability traits of `jtl-css`.
//!
//! The [`ElementFactory`] maps tag names to constructors and can be extended
//! at runtime.

/// Common widget fields and geometry.
pub mod base;
/// Push button.
pub mod button;
/// Container with nested children.
pub mod container;
/// Drawing commands.
pub mod display_list;
/// Tag to constructor registry.
pub mod factory;
/// Text measurement.
pub mod font;
/// Pointer, key and event types.
pub mod input;
/// Paragraph text.
pub mod text;
/// Input field.
pub mod text_field;
/// The widget trait.
pub mod widget;

pub use base::{Margins, Rect, WidgetBase};
pub use button::Button;
pub use container::Container;
pub use display_list::{DisplayCommand, DisplayList};
pub use factory::{Constructor, ElementFactory, SeedContext, WidgetSeed};
pub use font::{ApproximateFontMetrics, FontMetrics};
pub use input::{EventKind, FiredEvent, InputState, KeyInput};
pub use text::Text;
pub use text_field::TextField;
pub use widget::{PaintContext, Widget};
