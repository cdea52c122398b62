//! The style cascade.
//!
//! Declarations are applied to a widget through its capabilities, then the
//! text-relevant ones flow down to its children. A child keeps every key it
//! declares itself, and a key it declares also stops the parent's value from
//! reaching the child's own descendants.
//!
//! Malformed values drop only their own declaration; the field keeps its
//! previous value.

use jtl_common::warning::warn_once;

use crate::capability::{MarginEdge, Stylable};
use crate::declaration::{Declaration, StyleKey, parse_declarations};
use crate::values::{Axis, ColorValue, Length, Viewport};

/// Parse `declarations` and apply them to `target` and its children.
///
/// Percentages resolve against `viewport` now. The declarations are not added
/// to the target's style map; callers that want them to count as local
/// declarations insert them there first.
pub fn apply_style(declarations: &str, target: &mut dyn Stylable, viewport: Viewport) {
    apply_declarations(&parse_declarations(declarations), target, viewport);
}

/// Reapply the target's own style map.
pub fn apply_style_map(target: &mut dyn Stylable, viewport: Viewport) {
    let declarations = target.style_map().declarations().to_vec();
    apply_declarations(&declarations, target, viewport);
}

/// Apply already-parsed declarations to `target`, then propagate.
pub fn apply_declarations(declarations: &[Declaration], target: &mut dyn Stylable, viewport: Viewport) {
    for declaration in declarations {
        apply_declaration(declaration, target, viewport);
    }

    let inherited: Vec<Declaration> = declarations
        .iter()
        .filter(|d| d.style_key().is_some_and(StyleKey::is_text_relevant))
        .cloned()
        .collect();
    if !inherited.is_empty() {
        propagate(&inherited, target, viewport);
    }
}

fn propagate(declarations: &[Declaration], parent: &mut dyn Stylable, viewport: Viewport) {
    let Some(children) = parent.as_children() else {
        return;
    };

    children.for_each_child(&mut |child| {
        let missing: Vec<Declaration> = declarations
            .iter()
            .filter(|d| !child.style_map().contains_key(&d.key))
            .cloned()
            .collect();
        if missing.is_empty() {
            return;
        }
        for declaration in &missing {
            apply_declaration(declaration, child, viewport);
        }
        propagate(&missing, child, viewport);
    });
}

fn apply_declaration(declaration: &Declaration, target: &mut dyn Stylable, viewport: Viewport) {
    // Unknown keys are ignored.
    let Some(key) = declaration.style_key() else {
        return;
    };
    let value = declaration.value.as_str();

    match key {
        StyleKey::Width | StyleKey::Height => {
            let axis = if key == StyleKey::Width {
                Axis::Horizontal
            } else {
                Axis::Vertical
            };
            let Some(pixels) = resolve_length(declaration, viewport, axis) else {
                return;
            };
            if let Some(geometry) = target.as_geometry() {
                if key == StyleKey::Width {
                    geometry.set_width(pixels);
                } else {
                    geometry.set_height(pixels);
                }
            }
        }
        StyleKey::Color | StyleKey::BorderColor => {
            let Some(color) = ColorValue::parse_channels(value) else {
                malformed(declaration);
                return;
            };
            if let Some(colored) = target.as_color() {
                if key == StyleKey::Color {
                    colored.set_color(color);
                } else {
                    colored.set_border_color(color);
                }
            }
        }
        StyleKey::FontFamily => {
            if let Some(font) = target.as_font() {
                font.set_font_family(value);
            }
        }
        StyleKey::FontSize => {
            let Some(size) = resolve_length(declaration, viewport, Axis::Vertical) else {
                return;
            };
            if let Some(font) = target.as_font() {
                font.set_font_size(size);
            }
        }
        StyleKey::Margin
        | StyleKey::Padding
        | StyleKey::MarginLeft
        | StyleKey::MarginRight
        | StyleKey::MarginUp
        | StyleKey::MarginDown => {
            let (edge, axis) = match key {
                StyleKey::MarginLeft => (MarginEdge::Left, Axis::Horizontal),
                StyleKey::MarginRight => (MarginEdge::Right, Axis::Horizontal),
                StyleKey::MarginUp => (MarginEdge::Up, Axis::Vertical),
                StyleKey::MarginDown => (MarginEdge::Down, Axis::Vertical),
                _ => (MarginEdge::All, Axis::Horizontal),
            };
            let Some(pixels) = resolve_length(declaration, viewport, axis) else {
                return;
            };
            if let Some(geometry) = target.as_geometry() {
                geometry.set_margin(edge, pixels);
            }
        }
        StyleKey::Center => {
            if let Some(geometry) = target.as_geometry() {
                geometry.set_center(value == "true");
            }
        }
        StyleKey::Rotate => {
            let degrees = value.strip_suffix("deg").unwrap_or(value).trim().parse::<f32>();
            match degrees {
                Ok(degrees) if degrees.is_finite() => {
                    if let Some(geometry) = target.as_geometry() {
                        geometry.set_rotation(degrees);
                    }
                }
                _ => malformed(declaration),
            }
        }
        StyleKey::Class => target.set_class(value),
        StyleKey::Id => target.set_id(value),
    }
}

fn resolve_length(declaration: &Declaration, viewport: Viewport, axis: Axis) -> Option<f32> {
    let length = Length::parse(&declaration.value);
    if length.is_none() {
        malformed(declaration);
    }
    length.map(|length| length.resolve(viewport, axis))
}

fn malformed(declaration: &Declaration) {
    warn_once("style", &format!("ignoring malformed declaration '{declaration}'"));
}
