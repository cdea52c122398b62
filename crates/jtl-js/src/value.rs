//! Engine-neutral script values.
//!
//! Natives registered on a [`ScriptHost`](crate::ScriptHost) see their
//! arguments and produce their results as [`ScriptValue`]s; the host converts
//! to and from its own value type at the boundary.

use std::fmt;
use std::rc::Rc;

use crate::error::ScriptError;

/// Signature of a native function callable from scripts.
pub type NativeFn = Rc<dyn Fn(&[ScriptValue]) -> Result<ScriptValue, ScriptError>>;

/// A native function carried inside a [`ScriptValue`].
#[derive(Clone)]
pub struct ScriptFunction(pub NativeFn);

impl ScriptFunction {
    /// Wrap a closure.
    #[must_use]
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(&[ScriptValue]) -> Result<ScriptValue, ScriptError> + 'static,
    {
        Self(Rc::new(function))
    }

    /// Call it.
    ///
    /// # Errors
    ///
    /// Returns whatever error the native returns.
    pub fn call(&self, args: &[ScriptValue]) -> Result<ScriptValue, ScriptError> {
        (self.0)(args)
    }
}

impl fmt::Debug for ScriptFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<native function>")
    }
}

impl PartialEq for ScriptFunction {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// A value crossing the script boundary.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScriptValue {
    /// `null` / `undefined`.
    #[default]
    Nil,
    /// Boolean.
    Bool(bool),
    /// Number.
    Number(f64),
    /// String.
    String(String),
    /// Array.
    List(Vec<Self>),
    /// Object with its own enumerable string keys, in order.
    Table(Vec<(String, Self)>),
    /// Native function.
    Function(ScriptFunction),
}

impl ScriptValue {
    /// Is this `Nil`?
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// String payload, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Number payload, if this is a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Field of a table.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Table(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Set a field of a table, keeping its position if present. No-op on
    /// anything that is not a table.
    pub fn set(&mut self, key: &str, value: Self) {
        if let Self::Table(entries) = self {
            match entries.iter_mut().find(|(k, _)| k == key) {
                Some((_, slot)) => *slot = value,
                None => entries.push((key.to_string(), value)),
            }
        }
    }

    /// Type name for error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Table(_) => "table",
            Self::Function(_) => "function",
        }
    }

    /// String coercion used where a selector or source string is expected.
    ///
    /// Whole numbers print without a fraction; `Nil` and containers yield
    /// `None`.
    #[must_use]
    pub fn coerce_string(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => Some(format!("{n:.0}")),
            Self::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl From<&str> for ScriptValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ScriptValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for ScriptValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for ScriptValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for ScriptValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Nil, Into::into)
    }
}
