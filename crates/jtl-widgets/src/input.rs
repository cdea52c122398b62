//! Pointer and keyboard input, and the events widgets fire in response.

use strum_macros::{AsRefStr, Display, EnumString};

/// Pointer state sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    /// Pointer x in viewport coordinates.
    pub pointer_x: f32,
    /// Pointer y in viewport coordinates.
    pub pointer_y: f32,
    /// Is the primary button held down?
    pub primary_down: bool,
}

impl InputState {
    /// Pointer at a position with the primary button up.
    #[must_use]
    pub const fn hover(x: f32, y: f32) -> Self {
        Self {
            pointer_x: x,
            pointer_y: y,
            primary_down: false,
        }
    }

    /// Pointer at a position with the primary button down.
    #[must_use]
    pub const fn pressed(x: f32, y: f32) -> Self {
        Self {
            pointer_x: x,
            pointer_y: y,
            primary_down: true,
        }
    }
}

/// A key press delivered to widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// A character key.
    Char(char),
    /// Backspace.
    Backspace,
    /// Enter / Return.
    Enter,
    /// Escape.
    Escape,
}

/// Event kinds a script handler can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum EventKind {
    /// Fires once when the primary button goes down inside the widget.
    Click,
    /// Fires every frame while the primary button is held inside the widget.
    ClickRepeat,
    /// Fires when Enter is pressed in a focused input field.
    Submit,
}

/// An event that fired and the handler source attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredEvent {
    /// What happened.
    pub kind: EventKind,
    /// Script source to run.
    pub source: String,
}
