//! Engine configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```json
//! { "viewport": { "width": 1024 }, "watcher": { "rerun_scripts": false } }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use jtl_css::Viewport;
use jtl_widgets::SeedContext;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to load a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config '{}': {source}", path.display())]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid config JSON.
    #[error("invalid config '{}': {source}", path.display())]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Viewport size percentages and centering resolve against.
    pub viewport: ViewportConfig,
    /// Vertical flow metrics.
    pub flow: FlowConfig,
    /// Base font size for labels and input text.
    pub base_font_size: f32,
    /// Font family used when a widget declares none.
    pub font_family: String,
    /// Dirty-document watcher.
    pub watcher: WatcherConfig,
    /// JTLTP site used by `document.fetch`.
    pub site: SiteConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let seed = SeedContext::default();
        Self {
            viewport: ViewportConfig::default(),
            flow: FlowConfig::default(),
            base_font_size: seed.base_font_size,
            font_family: seed.font_family,
            watcher: WatcherConfig::default(),
            site: SiteConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The configured viewport.
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport.width, self.viewport.height)
    }

    /// Page-wide defaults handed to every widget constructor.
    #[must_use]
    pub fn seed_context(&self) -> SeedContext {
        SeedContext {
            viewport: self.viewport(),
            base_font_size: self.base_font_size,
            font_family: self.font_family.clone(),
        }
    }
}

/// Viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        let viewport = Viewport::default();
        Self {
            width: viewport.width,
            height: viewport.height,
        }
    }
}

/// Fixed vertical flow: every top-level widget is placed at `left`, below
/// the previous one, separated by `gap`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Left edge of every top-level widget.
    pub left: f32,
    /// Top edge of the first widget.
    pub top: f32,
    /// Default widget width.
    pub item_width: f32,
    /// Default widget height.
    pub item_height: f32,
    /// Vertical space between widgets.
    pub gap: f32,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            left: 20.0,
            top: 20.0,
            item_width: 200.0,
            item_height: 40.0,
            gap: 20.0,
        }
    }
}

/// Background watcher settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    /// Run the watcher thread at all.
    pub enabled: bool,
    /// How often the dirty flag is checked.
    pub interval_ms: u64,
    /// Re-run the page scripts after a dirty rebuild.
    pub rerun_scripts: bool,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: 1000,
            rerun_scripts: true,
        }
    }
}

impl WatcherConfig {
    /// The check interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// JTLTP site settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// `host:port` of the JTLTP server. Pages loaded over `jtltp://` use
    /// their own server when this is unset.
    pub address: Option<String>,
    /// Read timeout for fetches.
    pub timeout_ms: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            address: None,
            timeout_ms: 30_000,
        }
    }
}

impl SiteConfig {
    /// The fetch timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
