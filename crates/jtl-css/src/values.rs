//! Color and length values used by inline style declarations.

use serde::{Deserialize, Serialize};

/// RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorValue {
    /// Red channel (0-255).
    pub r: u8,
    /// Green channel (0-255).
    pub g: u8,
    /// Blue channel (0-255).
    pub b: u8,
    /// Alpha channel (0-255, 255 = fully opaque).
    pub a: u8,
}

impl ColorValue {
    /// Black.
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);

    /// White.
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);

    /// Build a color from its four channels.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse the `R,G,B,A` channel list used by `color` and `border-color`.
    ///
    /// Exactly four comma-separated integers in 0..=255 are required; anything
    /// else yields `None` so the caller keeps its previous color.
    #[must_use]
    pub fn parse_channels(value: &str) -> Option<Self> {
        let channels: Vec<&str> = value.split(',').map(str::trim).collect();
        let [r, g, b, a] = channels.as_slice() else {
            return None;
        };
        Some(Self {
            r: r.parse().ok()?,
            g: g.parse().ok()?,
            b: b.parse().ok()?,
            a: a.parse().ok()?,
        })
    }

    /// Multiply the RGB channels by `factor`, saturating at 255. Alpha is kept.
    ///
    /// Used for hover (`1.2`) and pressed (`0.8`) shading.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn scaled(self, factor: f32) -> Self {
        let scale = |channel: u8| (f32::from(channel) * factor).clamp(0.0, 255.0) as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: self.a,
        }
    }
}

/// The viewport axis a percentage resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Percentages of the viewport width.
    Horizontal,
    /// Percentages of the viewport height.
    Vertical,
}

/// Size of the visible drawing area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Viewport {
    /// Build a viewport.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Extent along an axis.
    #[must_use]
    pub const fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// A length: absolute pixels or a percentage of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Absolute pixels.
    Px(f32),
    /// Percentage of the viewport extent along the relevant axis.
    Percent(f32),
}

impl Length {
    /// Parse `120`, `120px` or `50%`. Returns `None` for anything else.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(percent) = value.strip_suffix('%') {
            return percent.trim().parse().ok().map(Self::Percent);
        }
        let number = value.strip_suffix("px").unwrap_or(value).trim();
        number.parse().ok().filter(|n: &f32| n.is_finite()).map(Self::Px)
    }

    /// Resolve to pixels. Percentages are resolved now, against the viewport
    /// passed in, and never cached.
    #[must_use]
    pub fn resolve(self, viewport: Viewport, axis: Axis) -> f32 {
        match self {
            Self::Px(px) => px,
            Self::Percent(percent) => viewport.extent(axis) * percent / 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_channel_list() {
        assert_eq!(
            ColorValue::parse_channels("255, 0, 0, 255"),
            Some(ColorValue::rgba(255, 0, 0, 255))
        );
        assert_eq!(ColorValue::parse_channels("255,0,0"), None);
        assert_eq!(ColorValue::parse_channels("255,0,zero,255"), None);
        assert_eq!(ColorValue::parse_channels("256,0,0,255"), None);
    }

    #[test]
    fn scales_and_saturates() {
        let color = ColorValue::rgba(200, 100, 10, 7);
        assert_eq!(color.scaled(1.2), ColorValue::rgba(240, 120, 12, 7));
        assert_eq!(ColorValue::rgba(250, 0, 0, 255).scaled(1.2).r, 255);
    }

    #[test]
    fn parses_and_resolves_lengths() {
        let viewport = Viewport::new(800.0, 600.0);
        assert_eq!(Length::parse("120"), Some(Length::Px(120.0)));
        assert_eq!(Length::parse("120px"), Some(Length::Px(120.0)));
        assert_eq!(Length::parse("50%"), Some(Length::Percent(50.0)));
        assert_eq!(Length::parse("wide"), None);
        assert!((Length::Percent(50.0).resolve(viewport, Axis::Vertical) - 300.0).abs() < f32::EPSILON);
        assert!((Length::Percent(25.0).resolve(viewport, Axis::Horizontal) - 200.0).abs() < f32::EPSILON);
    }
}
