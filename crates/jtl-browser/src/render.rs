//! Render list synchronization.
//!
//! [`rebuild`] derives the widget list from the store: one widget per record
//! with a known tag, stacked in a fixed vertical flow. It is called after
//! every store mutation, in the same critical section, so a published list
//! always matches the store it came from.

use std::collections::HashSet;

use jtl_common::warning::warn_once;
use jtl_css::{StyleMap, apply_declarations};
use jtl_dom::{ElementRecord, Selector};
use jtl_widgets::{
    DisplayList, ElementFactory, PaintContext, Rect, SeedContext, Widget, WidgetSeed,
};

use crate::config::FlowConfig;
use crate::loader::SCRIPT_TAG;
use crate::overrides::{Overrides, WidgetEdit};

/// The published widget list.
#[derive(Debug, Clone, Default)]
pub struct RenderList {
    widgets: Vec<Box<dyn Widget>>,
    content_height: f32,
}

impl RenderList {
    /// Widgets in document order.
    #[must_use]
    pub fn widgets(&self) -> &[Box<dyn Widget>] {
        &self.widgets
    }

    pub(crate) fn widgets_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut self.widgets
    }

    /// Total height of the flow, for scrolling.
    #[must_use]
    pub const fn content_height(&self) -> f32 {
        self.content_height
    }

    /// Number of widgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Returns true if no record produced a widget.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// First widget matching a selector.
    #[must_use]
    pub fn first(&self, selector: &Selector) -> Option<&dyn Widget> {
        self.widgets
            .iter()
            .find(|widget| widget.base().matches(selector))
            .map(AsRef::as_ref)
    }

    /// Paint every widget, in order.
    pub fn paint(&self, list: &mut DisplayList, context: &PaintContext<'_>) {
        for widget in &self.widgets {
            widget.paint(list, context);
        }
    }
}

/// What a rebuild needs besides the records.
#[derive(Debug, Clone, Copy)]
pub struct RenderInputs<'a> {
    /// Tag registry.
    pub factory: &'a ElementFactory,
    /// Script edits to replay.
    pub overrides: &'a Overrides,
    /// Flow metrics.
    pub flow: FlowConfig,
    /// Page-wide widget defaults.
    pub context: &'a SeedContext,
}

/// Derive a fresh render list from `records`.
///
/// Unknown tags produce no widget (and a warning); `script` elements are
/// skipped silently. Each widget gets the recorded edits for selectors it is
/// the first match of, then inherits pointer and focus state from the
/// widget at the same position in `previous` if both have the same tag.
#[must_use]
pub fn rebuild(records: &[ElementRecord], inputs: &RenderInputs<'_>, previous: &RenderList) -> RenderList {
    let flow = inputs.flow;
    let mut widgets: Vec<Box<dyn Widget>> = Vec::with_capacity(records.len());
    let mut claimed = HashSet::new();
    let mut y = flow.top;
    let mut content_height = 0.0;

    for record in records {
        let Some(tag) = record.tag() else {
            continue;
        };
        if tag == SCRIPT_TAG {
            continue;
        }
        let frame = Rect::new(flow.left, y, flow.item_width, flow.item_height);
        let seed = WidgetSeed::from_record(record, frame, inputs.context.clone());
        let Some(mut widget) = inputs.factory.create(tag, &seed) else {
            warn_once("render", &format!("no widget for tag '{tag}'"));
            continue;
        };

        replay_edits(&mut widget, tag, &seed, inputs, &mut claimed);
        let same_slot = previous
            .widgets
            .get(widgets.len())
            .filter(|old| old.base().tag == widget.base().tag);
        if let Some(old) = same_slot {
            widget.carry_state_from(old.as_ref());
        }

        let advance = widget.base().height + flow.gap;
        y += advance;
        content_height += advance;
        widgets.push(widget);
    }

    tracing::debug!(records = records.len(), widgets = widgets.len(), "render list rebuilt");
    RenderList {
        widgets,
        content_height,
    }
}

/// Apply every edit whose selector this widget is the first match of.
fn replay_edits<'a>(
    widget: &mut Box<dyn Widget>,
    tag: &str,
    seed: &WidgetSeed,
    inputs: &RenderInputs<'a>,
    claimed: &mut HashSet<&'a Selector>,
) {
    let matching: Vec<&'a (Selector, WidgetEdit)> = inputs
        .overrides
        .entries()
        .iter()
        .filter(|(selector, _)| !claimed.contains(selector) && widget.base().matches(selector))
        .collect();

    for (_, edit) in &matching {
        match edit {
            WidgetEdit::Handler { kind, source } => {
                widget.base_mut().set_event_handler(*kind, source);
            }
            WidgetEdit::AddStyle(declarations) => {
                let added = StyleMap::parse(declarations);
                for declaration in added.declarations() {
                    widget
                        .base_mut()
                        .style
                        .insert(&declaration.key, &declaration.value);
                }
                apply_declarations(
                    added.declarations(),
                    widget.as_stylable(),
                    seed.context.viewport,
                );
            }
            WidgetEdit::ClearStyle => {
                let mut plain = seed.clone();
                plain.style = StyleMap::new();
                if let Some(mut unstyled) = inputs.factory.create(tag, &plain) {
                    unstyled.base_mut().event_handlers = widget.base().event_handlers.clone();
                    *widget = unstyled;
                }
            }
        }
    }

    claimed.extend(matching.into_iter().map(|entry| &entry.0));
}
