//! Engine warnings with deduplication.
//!
//! Provides deduplication to avoid spamming the same warning every frame.
//! Used by the style cascade, the element factory and the scripting bridge to
//! report recovered problems (unknown tags, malformed declarations, unknown
//! event kinds).

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Set of warnings already emitted since the last [`clear_warnings`].
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a recovered problem (emitted once per unique message).
///
/// # Example
/// ```ignore
/// warn_once("style", "malformed color value '12,34'");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_emit = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_emit {
        tracing::warn!(component, "{message}");
    }
}

/// Has this warning been emitted since the last [`clear_warnings`]?
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&format!("[{component}] {message}")))
}

/// Clear all recorded warnings (called when a new page loads).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
