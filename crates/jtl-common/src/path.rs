//! Resolution of resources referenced by a page.
//!
//! Pages reference external script sources through a `src` attribute. The
//! value is interpreted relative to the directory that contains the open page.

use std::path::{Path, PathBuf};

/// Returns true when `location` names a remote page rather than a local file.
#[must_use]
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Resolve `relative` against the directory of the page at `page_path`.
///
/// Absolute paths are returned unchanged. A page path without a parent
/// directory resolves against the current directory.
#[must_use]
pub fn resolve_relative_to_page(page_path: &Path, relative: &str) -> PathBuf {
    let relative_path = Path::new(relative);
    if relative_path.is_absolute() {
        return relative_path.to_path_buf();
    }

    page_path
        .parent()
        .map_or_else(|| relative_path.to_path_buf(), |dir| dir.join(relative_path))
}

/// Resolve `relative` against the location of a remote page.
///
/// Mirrors [`resolve_relative_to_page`] for `http(s)` page locations: the last
/// path segment of `base` is replaced by `relative`.
#[must_use]
pub fn resolve_relative_to_url(base: &str, relative: &str) -> String {
    if is_remote(relative) {
        return relative.to_string();
    }

    let base_dir = base.rsplit_once('/').map_or(base, |(dir, _)| dir);
    format!("{base_dir}/{}", relative.trim_start_matches("./"))
}
