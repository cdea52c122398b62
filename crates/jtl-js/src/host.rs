//! The script host interface.

use crate::error::ScriptError;
use crate::value::{NativeFn, ScriptValue};

/// An embedded interpreter.
///
/// The engine drives scripts only through this trait: it runs source text,
/// installs native functions at dotted global paths, and converts values at
/// the boundary.
pub trait ScriptHost {
    /// The interpreter's own value type.
    type Native;

    /// Run source text and return its completion value.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Exception`] if the source does not parse or
    /// throws.
    fn run(&mut self, source: &str) -> Result<ScriptValue, ScriptError>;

    /// Install `function` at a dotted path such as `document.get`, creating
    /// intermediate objects as needed.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Registration`] if the path is empty or an
    /// intermediate segment is not an object.
    fn register_native_function(&mut self, path: &str, function: NativeFn) -> Result<(), ScriptError>;

    /// Convert a script value into an interpreter value.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Exception`] if the interpreter fails to build
    /// the value.
    #[allow(clippy::wrong_self_convention)]
    fn to_native(&mut self, value: &ScriptValue) -> Result<Self::Native, ScriptError>;

    /// Convert an interpreter value into a script value.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Exception`] if reading the value throws (for
    /// example a getter that throws).
    #[allow(clippy::wrong_self_convention)]
    fn from_native(&mut self, value: &Self::Native) -> Result<ScriptValue, ScriptError>;
}
