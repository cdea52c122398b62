//! Display List - a sequence of drawing commands
//!
//! The display list is what widgets produce when painted. An external drawing
//! layer walks it in order (back to front) and rasterizes each command.
//!
//! Rotations are in degrees and apply about the center of the command's own
//! bounding box.

use jtl_css::ColorValue;

/// A single drawing command.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCommand {
    /// Fill a rectangle with a solid color.
    FillRect {
        /// X coordinate of the rectangle's top-left corner.
        x: f32,
        /// Y coordinate of the rectangle's top-left corner.
        y: f32,
        /// Width of the rectangle in pixels.
        width: f32,
        /// Height of the rectangle in pixels.
        height: f32,
        /// Fill color.
        color: ColorValue,
        /// Rotation in degrees.
        rotation: f32,
    },

    /// Outline a rectangle with a one pixel border.
    StrokeRect {
        /// X coordinate of the rectangle's top-left corner.
        x: f32,
        /// Y coordinate of the rectangle's top-left corner.
        y: f32,
        /// Width of the rectangle in pixels.
        width: f32,
        /// Height of the rectangle in pixels.
        height: f32,
        /// Border color.
        color: ColorValue,
        /// Rotation in degrees.
        rotation: f32,
    },

    /// Draw a run of text with its top-left corner at a position.
    DrawText {
        /// X coordinate of the text box.
        x: f32,
        /// Y coordinate of the text box.
        y: f32,
        /// The text to draw.
        text: String,
        /// Font family name, resolved to a font asset by the drawing layer.
        font_family: String,
        /// Font size in pixels.
        font_size: f32,
        /// Text color.
        color: ColorValue,
        /// Rotation in degrees.
        rotation: f32,
    },
}

/// A list of drawing commands in painting order.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    commands: Vec<DisplayCommand>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Add a command to the display list.
    pub fn push(&mut self, command: DisplayCommand) {
        self.commands.push(command);
    }

    /// Get the commands in painting order.
    #[must_use]
    pub fn commands(&self) -> &[DisplayCommand] {
        &self.commands
    }

    /// Text of every `DrawText` command, in order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DisplayCommand::DrawText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Get the number of commands.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the display list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
