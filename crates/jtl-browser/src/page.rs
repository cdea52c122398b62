//! A loaded page and its frame loop.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use jtl_common::warning::clear_warnings;
use jtl_css::Viewport;
use jtl_dom::ElementRecord;
use jtl_js::{BoaHost, ScriptError, ScriptHost, ScriptValue};
use jtl_net::{Client, Fetcher};
use jtl_widgets::{
    ApproximateFontMetrics, DisplayList, ElementFactory, FiredEvent, FontMetrics, InputState,
    KeyInput, PaintContext, Widget, WidgetSeed,
};

use crate::bridge::{self, FrameHooks, PageSession};
use crate::config::{EngineConfig, WatcherConfig};
use crate::error::LoadError;
use crate::loader::{PageLocation, extract_scripts};
use crate::markup::{JsonMarkup, MarkupParser};
use crate::render::RenderList;
use crate::state::{DocumentState, PageShared};
use crate::watcher::{ScriptJob, Watcher, watch_step};

/// One open page: its document, its script host and its watcher.
///
/// A page is driven from one thread by calling [`Page::frame`]. The script
/// host never leaves that thread; the watcher only touches the document and
/// hands reruns back through a queue.
pub struct Page {
    session: Rc<PageSession>,
    host: BoaHost,
    location: PageLocation,
    scripts: String,
    metrics: Box<dyn FontMetrics>,
    watcher_config: WatcherConfig,
    jobs: Receiver<ScriptJob>,
    job_sender: Sender<ScriptJob>,
    watcher: Option<Watcher>,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("location", &self.location)
            .field("session", &self.session)
            .field("watching", &self.watcher.is_some())
            .finish_non_exhaustive()
    }
}

impl Page {
    /// Load a page from a file path, an `http(s)` URL or a `jtltp://`
    /// location, parsing it as JSON records.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the page cannot be read or parsed, or the
    /// script host cannot start. Script errors are logged, not returned.
    pub fn load(location: &str, config: &EngineConfig) -> Result<Self, LoadError> {
        Self::load_with(location, config, &JsonMarkup, ElementFactory::with_builtins())
    }

    /// [`Page::load`] with a custom markup parser and tag registry.
    ///
    /// # Errors
    ///
    /// Same as [`Page::load`].
    pub fn load_with(
        location: &str,
        config: &EngineConfig,
        parser: &dyn MarkupParser,
        factory: ElementFactory,
    ) -> Result<Self, LoadError> {
        clear_warnings();
        let location = PageLocation::parse(location);
        let source = location.read(config)?;
        let records = parser.parse(&source)?;
        Self::open(records, location, config, factory)
    }

    /// Open a page from JSON page text that has no location of its own.
    ///
    /// # Errors
    ///
    /// Same as [`Page::load`].
    pub fn from_source(source: &str, config: &EngineConfig) -> Result<Self, LoadError> {
        clear_warnings();
        let records = JsonMarkup.parse(source)?;
        Self::open(records, PageLocation::Inline, config, ElementFactory::with_builtins())
    }

    /// Open a page from already-parsed records.
    ///
    /// The store is filled and the render list built before the page
    /// scripts run, so scripts see every element.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Script`] if the script host cannot start.
    pub fn open(
        records: Vec<ElementRecord>,
        location: PageLocation,
        config: &EngineConfig,
        factory: ElementFactory,
    ) -> Result<Self, LoadError> {
        let scripts = extract_scripts(&records, &location, config);

        let mut state = DocumentState::new(config, factory);
        state.load(records);
        tracing::info!(
            page = %location,
            records = state.store().len(),
            widgets = state.render_list().len(),
            "page loaded"
        );
        let shared = Arc::new(PageShared::new(state));

        let fetcher = config
            .site
            .address
            .as_deref()
            .or_else(|| location.site_address())
            .map(|address| {
                Box::new(Client::new(address).with_timeout(config.site.timeout())) as Box<dyn Fetcher>
            });
        let session = Rc::new(PageSession {
            shared: Arc::clone(&shared),
            hooks: RefCell::new(FrameHooks::default()),
            fetcher,
        });

        let mut host = BoaHost::new()?;
        bridge::install(&mut host, &session)?;

        let (job_sender, jobs) = mpsc::channel();
        let watcher = if config.watcher.enabled {
            Watcher::spawn(shared, config.watcher, job_sender.clone())
                .inspect_err(|e| tracing::error!(error = %e, "cannot start the watcher"))
                .ok()
        } else {
            None
        };

        let mut page = Self {
            session,
            host,
            location,
            scripts,
            metrics: Box::new(ApproximateFontMetrics),
            watcher_config: config.watcher,
            jobs,
            job_sender,
            watcher,
        };
        page.run_page_scripts();
        Ok(page)
    }

    /// Where the page came from.
    #[must_use]
    pub const fn location(&self) -> &PageLocation {
        &self.location
    }

    /// The page scripts, concatenated.
    #[must_use]
    pub fn scripts(&self) -> &str {
        &self.scripts
    }

    /// Copy of the current render list.
    #[must_use]
    pub fn snapshot(&self) -> RenderList {
        self.session.shared.snapshot()
    }

    /// Copy of the current records, in document order.
    #[must_use]
    pub fn records(&self) -> Vec<ElementRecord> {
        self.session.shared.read().store().records().to_vec()
    }

    /// Height of the laid-out flow, for scrolling.
    #[must_use]
    pub fn content_height(&self) -> f32 {
        self.session.shared.read().render_list().content_height()
    }

    /// Resize the viewport; percentage sizes resolve again.
    pub fn set_viewport(&self, width: f32, height: f32) {
        self.session
            .shared
            .write()
            .set_viewport(Viewport::new(width, height));
    }

    /// Use real font metrics instead of the built-in approximation.
    pub fn set_font_metrics(&mut self, metrics: Box<dyn FontMetrics>) {
        self.metrics = metrics;
    }

    /// Teach the page a new tag. Existing records with that tag get widgets
    /// immediately.
    pub fn register_widget<F>(&self, tag: &str, constructor: F)
    where
        F: Fn(&ElementFactory, &WidgetSeed) -> Box<dyn Widget> + Send + Sync + 'static,
    {
        self.session.shared.write().register_widget(tag, constructor);
    }

    /// Run script source on the page's interpreter.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError`] if the script fails to parse or throws.
    pub fn run_script(&mut self, source: &str) -> Result<ScriptValue, ScriptError> {
        self.host.run(source)
    }

    /// Do the watcher's work now, on this thread: rebuild if the document is
    /// dirty and queue a script rerun for the next frame if configured.
    /// Returns whether the document was dirty.
    #[must_use]
    pub fn check_dirty(&self) -> bool {
        watch_step(
            &self.session.shared,
            self.watcher_config.rerun_scripts,
            &self.job_sender,
        )
    }

    /// Advance one frame.
    ///
    /// In order: queued watcher jobs, frame hooks, pointer and key dispatch
    /// with the handlers that fired, then painting. Script errors anywhere
    /// are logged and the frame carries on.
    pub fn frame(&mut self, input: &InputState, keys: &[KeyInput]) -> DisplayList {
        while let Ok(job) = self.jobs.try_recv() {
            match job {
                ScriptJob::RerunPageScripts => self.run_page_scripts(),
            }
        }

        let due = self.session.hooks.borrow_mut().take_due();
        for source in due {
            self.run_logged("frame hook", &source);
        }

        for event in self.dispatch_input(input, keys) {
            self.run_logged(event.kind.as_ref(), &event.source);
        }

        self.draw()
    }

    /// Paint the current render list without advancing.
    #[must_use]
    pub fn draw(&self) -> DisplayList {
        let snapshot = self.snapshot();
        let viewport = self.session.shared.read().viewport();
        let context = PaintContext {
            viewport,
            metrics: self.metrics.as_ref(),
        };
        let mut list = DisplayList::new();
        snapshot.paint(&mut list, &context);
        list
    }

    /// Feed input to the widgets and collect the handlers that fired. The
    /// document lock is released before any handler runs.
    fn dispatch_input(&self, input: &InputState, keys: &[KeyInput]) -> Vec<FiredEvent> {
        let mut state = self.session.shared.write();
        let viewport = state.viewport();
        let mut fired = Vec::new();
        let widgets = state.render_list_mut().widgets_mut();
        for widget in widgets.iter_mut() {
            widget.handle_pointer(input, viewport, &mut fired);
        }
        for &key in keys {
            let _ = widgets
                .iter_mut()
                .any(|widget| widget.handle_key(key, &mut fired));
        }
        fired
    }

    fn run_page_scripts(&mut self) {
        if self.scripts.trim().is_empty() {
            return;
        }
        let scripts = self.scripts.clone();
        self.run_logged("page scripts", &scripts);
    }

    fn run_logged(&mut self, what: &str, source: &str) {
        tracing::debug!(what, "running script");
        if let Err(e) = self.host.run(source) {
            tracing::error!(what, error = %e, "script failed");
        }
    }
}
