//! Document state shared between the frame loop and the watcher.
//!
//! The store, the published render list and the widget edits live together
//! behind one `RwLock`, so every mutation and the rebuild it triggers happen
//! in one critical section. The lock is never held while a script runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use jtl_css::Viewport;
use jtl_dom::{DocumentStore, ElementRecord, Selector};
use jtl_widgets::{ElementFactory, SeedContext, Widget, WidgetSeed};

use crate::config::{EngineConfig, FlowConfig};
use crate::overrides::{Overrides, WidgetEdit};
use crate::render::{RenderInputs, RenderList, rebuild};

/// A page's document: store, render list and widget edits.
///
/// Every mutating method rebuilds the render list before returning.
#[derive(Debug)]
pub struct DocumentState {
    store: DocumentStore,
    render: RenderList,
    overrides: Overrides,
    factory: ElementFactory,
    flow: FlowConfig,
    context: SeedContext,
}

impl DocumentState {
    /// Empty document laid out per `config`.
    #[must_use]
    pub fn new(config: &EngineConfig, factory: ElementFactory) -> Self {
        Self {
            store: DocumentStore::new(),
            render: RenderList::default(),
            overrides: Overrides::new(),
            factory,
            flow: config.flow,
            context: config.seed_context(),
        }
    }

    /// The element store.
    #[must_use]
    pub const fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// The current render list.
    #[must_use]
    pub const fn render_list(&self) -> &RenderList {
        &self.render
    }

    pub(crate) const fn render_list_mut(&mut self) -> &mut RenderList {
        &mut self.render
    }

    /// Recorded widget edits.
    #[must_use]
    pub const fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// The viewport widgets are laid out against.
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.context.viewport
    }

    /// Re-derive the render list from the store.
    pub fn rebuild(&mut self) {
        let inputs = RenderInputs {
            factory: &self.factory,
            overrides: &self.overrides,
            flow: self.flow,
            context: &self.context,
        };
        self.render = rebuild(self.store.records(), &inputs, &self.render);
    }

    /// Start over with `records`: the store is replaced and widget edits
    /// from a previous page are forgotten.
    pub fn load(&mut self, records: Vec<ElementRecord>) {
        self.overrides.clear();
        self.store.replace_all(records);
        self.rebuild();
    }

    /// Empty the store.
    pub fn clear(&mut self) {
        self.store.clear();
        self.rebuild();
    }

    /// Append a record.
    pub fn insert(&mut self, record: ElementRecord) {
        self.store.insert(record);
        self.rebuild();
    }

    /// Insert a record at `index`, clamped to the end. Returns the index used.
    pub fn insert_at(&mut self, index: usize, record: ElementRecord) -> usize {
        let index = self.store.insert_at(index, record);
        self.rebuild();
        index
    }

    /// Remove every record the selector matches. Returns how many went.
    pub fn remove(&mut self, selector: &Selector) -> usize {
        let removed = self
            .store
            .remove_by_attribute(selector.attribute(), selector.value());
        self.rebuild();
        removed
    }

    /// Replace the first record the selector matches, or append. Returns the
    /// index the record ends up at.
    pub fn replace(&mut self, selector: &Selector, record: ElementRecord) -> usize {
        let index = self
            .store
            .replace_by_attribute(selector.attribute(), selector.value(), record);
        self.rebuild();
        index
    }

    /// Replace the whole document; widget edits are kept.
    pub fn replace_all(&mut self, records: Vec<ElementRecord>) {
        self.store.replace_all(records);
        self.rebuild();
    }

    /// Record a widget edit and apply it.
    pub fn edit_widget(&mut self, selector: Selector, edit: WidgetEdit) {
        self.overrides.record(selector, edit);
        self.rebuild();
    }

    /// Change the viewport; percentages resolve again.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.context.viewport = viewport;
        self.rebuild();
    }

    /// Register a widget constructor for `tag` and rebuild, so records with
    /// that tag get widgets right away.
    pub fn register_widget<F>(&mut self, tag: &str, constructor: F)
    where
        F: Fn(&ElementFactory, &WidgetSeed) -> Box<dyn Widget> + Send + Sync + 'static,
    {
        self.factory.register(tag, constructor);
        self.rebuild();
    }

    /// First record the selector matches.
    #[must_use]
    pub fn first_record(&self, selector: &Selector) -> Option<&ElementRecord> {
        self.store.first(selector)
    }

    /// Position of the first record the selector matches.
    #[must_use]
    pub fn position(&self, selector: &Selector) -> Option<usize> {
        self.store.position(selector)
    }

    /// Live text of the first widget the selector matches.
    #[must_use]
    pub fn live_text(&self, selector: &Selector) -> Option<&str> {
        self.render.first(selector).and_then(Widget::live_text)
    }
}

/// State shared across threads: the document and its dirty flag.
#[derive(Debug)]
pub struct PageShared {
    state: RwLock<DocumentState>,
    dirty: AtomicBool,
}

impl PageShared {
    /// Share `state`.
    #[must_use]
    pub const fn new(state: DocumentState) -> Self {
        Self {
            state: RwLock::new(state),
            dirty: AtomicBool::new(false),
        }
    }

    /// Read access. A writer that panicked leaves a consistent document
    /// behind (mutations rebuild before returning), so poisoning is ignored.
    pub fn read(&self) -> RwLockReadGuard<'_, DocumentState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write access.
    pub fn write(&self) -> RwLockWriteGuard<'_, DocumentState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the render list, taken under the read lock.
    #[must_use]
    pub fn snapshot(&self) -> RenderList {
        self.read().render_list().clone()
    }

    /// Flag the document for the watcher.
    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    /// Clear the dirty flag, returning whether it was set.
    #[must_use]
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }

    /// Is the document flagged?
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }
}
