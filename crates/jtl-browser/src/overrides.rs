//! Widget-level edits made by scripts.
//!
//! `onEvent`, `addStyle` and `removeAllStyle` change widgets, not records.
//! Widgets are rebuilt from the store after every mutation, so the edits are
//! kept here, keyed by selector, and replayed onto the first matching widget
//! of each rebuild.

use jtl_dom::Selector;
use jtl_widgets::EventKind;

/// One recorded edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEdit {
    /// Attach handler source for an event kind.
    Handler {
        /// Event kind.
        kind: EventKind,
        /// Script source.
        source: String,
    },
    /// Add declarations to the widget's style map and apply them.
    AddStyle(String),
    /// Drop every declaration, including the record's own `style`.
    ClearStyle,
}

/// Ordered registry of edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    entries: Vec<(Selector, WidgetEdit)>,
}

impl Overrides {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record an edit. Edits it makes obsolete are dropped: a handler
    /// replaces the previous handler of the same kind, and clearing the
    /// style forgets earlier style edits for the selector.
    pub fn record(&mut self, selector: Selector, edit: WidgetEdit) {
        match &edit {
            WidgetEdit::Handler { kind, .. } => self.entries.retain(|(s, e)| {
                !(s == &selector && matches!(e, WidgetEdit::Handler { kind: k, .. } if k == kind))
            }),
            WidgetEdit::ClearStyle => self.entries.retain(|(s, e)| {
                !(s == &selector && matches!(e, WidgetEdit::AddStyle(_) | WidgetEdit::ClearStyle))
            }),
            WidgetEdit::AddStyle(_) => {}
        }
        tracing::debug!(%selector, ?edit, "widget edit recorded");
        self.entries.push((selector, edit));
    }

    /// All edits, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[(Selector, WidgetEdit)] {
        &self.entries
    }

    /// Forget every edit.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of recorded edits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler(kind: EventKind, source: &str) -> WidgetEdit {
        WidgetEdit::Handler {
            kind,
            source: source.to_string(),
        }
    }

    #[test]
    fn handler_replaces_same_kind_only() {
        let mut overrides = Overrides::new();
        let go = Selector::parse("#go");
        overrides.record(go.clone(), handler(EventKind::Click, "a()"));
        overrides.record(go.clone(), handler(EventKind::ClickRepeat, "b()"));
        overrides.record(go.clone(), handler(EventKind::Click, "c()"));
        assert_eq!(
            overrides.entries(),
            [
                (go.clone(), handler(EventKind::ClickRepeat, "b()")),
                (go, handler(EventKind::Click, "c()")),
            ]
        );
    }

    #[test]
    fn clear_style_forgets_earlier_style_edits() {
        let mut overrides = Overrides::new();
        let note = Selector::parse(".note");
        let other = Selector::parse(".other");
        overrides.record(note.clone(), WidgetEdit::AddStyle("width:10".into()));
        overrides.record(other.clone(), WidgetEdit::AddStyle("width:20".into()));
        overrides.record(note.clone(), handler(EventKind::Click, "x()"));
        overrides.record(note.clone(), WidgetEdit::ClearStyle);
        assert_eq!(overrides.len(), 3);
        assert!(!overrides.entries().contains(&(note, WidgetEdit::AddStyle("width:10".into()))));
        assert!(overrides.entries().contains(&(other, WidgetEdit::AddStyle("width:20".into()))));
    }
}
