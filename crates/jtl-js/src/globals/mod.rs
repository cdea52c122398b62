//! Global objects every page script sees.
//!
//! `document` is not registered here; the page session installs it through
//! [`ScriptHost::register_native_function`](crate::ScriptHost::register_native_function).

mod console;

use boa_engine::{Context, JsResult};

/// Register all built-in globals on the context.
///
/// # Errors
///
/// Fails if a global cannot be defined.
pub fn register_globals(context: &mut Context) -> JsResult<()> {
    console::register_console(context)
}
