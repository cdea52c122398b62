//! Script errors.

use thiserror::Error;

/// Errors raised while running scripts or calling natives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// The script failed to parse or threw.
    #[error("script error: {0}")]
    Exception(String),

    /// A native was called with an argument it cannot use.
    #[error("{function}: {message}")]
    BadArgument {
        /// Native function name, e.g. `document.add`.
        function: String,
        /// What was wrong.
        message: String,
    },

    /// A native could not be installed.
    #[error("cannot register '{path}': {reason}")]
    Registration {
        /// Dotted path, e.g. `document.get`.
        path: String,
        /// Why.
        reason: String,
    },
}

impl ScriptError {
    /// Shorthand for [`ScriptError::BadArgument`].
    #[must_use]
    pub fn bad_argument(function: &str, message: impl Into<String>) -> Self {
        Self::BadArgument {
            function: function.to_string(),
            message: message.into(),
        }
    }
}
