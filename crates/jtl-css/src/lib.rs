//! Inline style declarations and the style cascade for the JTL engine.
//!
//! # Scope
//!
//! This crate implements:
//! - **Declaration parsing** - `key:value;key:value` strings into an ordered
//!   [`StyleMap`]
//! - **Values** - RGBA colors, pixel and viewport-percentage lengths
//! - **Capabilities** - the small traits a widget implements to receive
//!   geometry, color, font and child declarations
//! - **Cascade** - applying declarations to a widget and propagating
//!   text-relevant ones to its children
//!
//! # Not Implemented
//!
//! - Stylesheets, selectors inside styles, specificity
//! - Named or hex colors (only `R,G,B,A` channel lists)
//! - Units other than `px` and `%`

/// Applying declarations to widgets.
pub mod cascade;
/// Capability traits implemented by widget kinds.
pub mod capability;
/// Parsing of `key:value;...` declaration strings.
pub mod declaration;
/// Color and length values.
pub mod values;

pub use capability::{HasChildren, HasColor, HasFont, HasGeometry, HasText, MarginEdge, Stylable};
pub use cascade::{apply_declarations, apply_style, apply_style_map};
pub use declaration::{Declaration, StyleKey, StyleMap, parse_declarations};
pub use values::{Axis, ColorValue, Length, Viewport};
