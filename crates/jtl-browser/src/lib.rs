//! Page sessions for the JTL engine.
//!
//! # Scope
//!
//! This crate provides:
//! - **Page Loading** - read JTL pages from files, HTTP or JTLTP and parse
//!   them into element records
//! - **Render List** - project the document into positioned widgets, with
//!   script edits replayed on every rebuild
//! - **Scripting Bridge** - the `document` API page scripts call
//! - **Frame Loop** - watcher jobs, frame hooks, input dispatch and painting
//! - **Watcher** - background rebuild of documents replaced by scripts
//!
//! # Example
//!
//! ```ignore
//! use jtl_browser::{EngineConfig, Page};
//! use jtl_widgets::InputState;
//!
//! let mut page = Page::load("pages/index.jtl", &EngineConfig::default())?;
//! let list = page.frame(&InputState::default(), &[]);
//! for text in list.texts() {
//!     println!("{text}");
//! }
//! ```

/// The `document` script API.
pub mod bridge;
/// Engine configuration.
pub mod config;
/// Load errors.
pub mod error;
/// Page locations and script extraction.
pub mod loader;
/// Page text to element records.
pub mod markup;
/// Widget edits recorded by scripts.
pub mod overrides;
/// A loaded page.
pub mod page;
/// Records to positioned widgets.
pub mod render;
/// Shared document state.
pub mod state;
/// Background dirty watcher.
pub mod watcher;

pub use jtl_css as css;
pub use jtl_dom as dom;
pub use jtl_js as js;
pub use jtl_net as net;
pub use jtl_widgets as widgets;

pub use config::{ConfigError, EngineConfig, FlowConfig, SiteConfig, ViewportConfig, WatcherConfig};
pub use error::LoadError;
pub use loader::{PageLocation, extract_scripts};
pub use markup::{JsonMarkup, MarkupError, MarkupParser};
pub use overrides::{Overrides, WidgetEdit};
pub use page::Page;
pub use render::RenderList;
pub use state::{DocumentState, PageShared};
pub use watcher::{ScriptJob, Watcher};
