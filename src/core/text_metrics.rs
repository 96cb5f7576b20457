//! Text measurement capability.
//!
//! Layout never shapes text itself. Hosts plug in whatever font backend they
//! render with; the engine only consumes the resulting extents.

use serde::{Deserialize, Serialize};

/// Rendered size of one string in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}

impl TextExtent {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Measures strings for a given font family and size.
///
/// Implementations must be pure: the same inputs return the same extent and
/// measuring has no observable side effects.
pub trait TextMetrics: Send + Sync {
    fn measure(&self, text: &str, font_family: &str, font_size: f64) -> TextExtent;
}

impl<F> TextMetrics for F
where
    F: Fn(&str, &str, f64) -> TextExtent + Send + Sync,
{
    fn measure(&self, text: &str, font_family: &str, font_size: f64) -> TextExtent {
        self(text, font_family, font_size)
    }
}

/// Font-agnostic estimate based on average glyph width and line height.
///
/// Suitable for headless layout and tests; real hosts should measure with
/// their rendering backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicTextMetrics {
    pub average_glyph_em: f64,
    pub line_height_em: f64,
}

impl Default for HeuristicTextMetrics {
    fn default() -> Self {
        Self {
            average_glyph_em: 0.6,
            line_height_em: 1.15,
        }
    }
}

impl TextMetrics for HeuristicTextMetrics {
    fn measure(&self, text: &str, _font_family: &str, font_size: f64) -> TextExtent {
        if text.is_empty() || !font_size.is_finite() || font_size <= 0.0 {
            return TextExtent::default();
        }
        let glyphs = text.chars().count() as f64;
        TextExtent {
            width: glyphs * self.average_glyph_em * font_size,
            height: self.line_height_em * font_size,
        }
    }
}
