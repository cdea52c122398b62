//! Text measurement.

/// Font metrics provider for measuring text.
///
/// The drawing layer owns real fonts; widgets only need advance widths and
/// line heights to place text, so they ask through this trait.
pub trait FontMetrics {
    /// Measure the total advance width of a text string at the given font size.
    fn text_width(&self, text: &str, font_size: f32) -> f32;

    /// Calculate the line height for a given font size.
    fn line_height(&self, font_size: f32) -> f32;
}

/// Approximate font metrics using fixed ratios.
///
/// Without access to font data, the average advance width of Latin glyphs in
/// a proportional font is taken as 0.6× the font size, and the line height as
/// 1.2× the font size.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateFontMetrics;

impl FontMetrics for ApproximateFontMetrics {
    #[allow(clippy::cast_precision_loss)]
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        const CHAR_WIDTH_RATIO: f32 = 0.6;
        text.chars().count() as f32 * font_size * CHAR_WIDTH_RATIO
    }

    fn line_height(&self, font_size: f32) -> f32 {
        const LINE_HEIGHT_RATIO: f32 = 1.2;
        font_size * LINE_HEIGHT_RATIO
    }
}
