//! The widget trait.

use std::any::Any;
use std::fmt;

use jtl_css::{Stylable, Viewport, apply_style_map};

use crate::base::WidgetBase;
use crate::display_list::DisplayList;
use crate::factory::WidgetSeed;
use crate::font::FontMetrics;
use crate::input::{FiredEvent, InputState, KeyInput};

/// What a widget needs to paint itself.
#[derive(Clone, Copy)]
pub struct PaintContext<'a> {
    /// Current viewport, for centered widgets.
    pub viewport: Viewport,
    /// Text measurement.
    pub metrics: &'a dyn FontMetrics,
}

impl fmt::Debug for PaintContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaintContext")
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

/// A typed, renderable projection of one element record.
///
/// Widgets are derived from the document store and rebuilt whenever it
/// changes; they are never the source of truth. The cascade reaches a widget's
/// fields through its [`Stylable`] capabilities.
pub trait Widget: Stylable + Send + Sync + fmt::Debug {
    /// Human-readable kind name (`button`, `text`, `textfield`, `container`).
    fn kind(&self) -> &'static str;

    /// Shared fields.
    fn base(&self) -> &WidgetBase;

    /// Shared fields, mutably.
    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Clone into a new box.
    fn clone_box(&self) -> Box<dyn Widget>;

    /// Downcasting support for state carry-over.
    fn as_any(&self) -> &dyn Any;

    /// This widget as a cascade target.
    fn as_stylable(&mut self) -> &mut dyn Stylable;

    /// Emit drawing commands.
    fn paint(&self, list: &mut DisplayList, context: &PaintContext<'_>);

    /// Update pointer state and collect the handlers that fire this frame.
    fn handle_pointer(&mut self, input: &InputState, viewport: Viewport, fired: &mut Vec<FiredEvent>) {
        let inside = self
            .base()
            .rect(viewport)
            .contains(input.pointer_x, input.pointer_y);
        self.base_mut()
            .track_pointer(inside, input.primary_down, fired);
    }

    /// Offer a key press. Returns true if the widget consumed it.
    fn handle_key(&mut self, _key: KeyInput, _fired: &mut Vec<FiredEvent>) -> bool {
        false
    }

    /// Live text, for kinds that have any. For input fields this is what
    /// the user has typed so far.
    fn live_text(&self) -> Option<&str> {
        None
    }

    /// Nested widgets, for containers.
    fn children(&self) -> &[Box<dyn Widget>] {
        &[]
    }

    /// Take over interaction state from the widget this one replaces after a
    /// rebuild. Only called when both were created for the same tag.
    fn carry_state_from(&mut self, previous: &dyn Widget) {
        self.base_mut().carry_interaction_from(previous.base());
    }
}

/// Store the seed's class, id and local styles on `widget`, then run the
/// cascade over them.
pub(crate) fn apply_seed_style<W: Widget>(widget: &mut W, seed: &WidgetSeed) {
    widget.set_class(&seed.class);
    widget.set_id(&seed.id);
    widget.base_mut().style = seed.style.clone();
    apply_style_map(widget, seed.context.viewport);
}

impl Clone for Box<dyn Widget> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
