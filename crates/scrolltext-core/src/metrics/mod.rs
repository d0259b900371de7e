//! Text measurement
//!
//! The engine never measures text itself: it asks a [`TextMeasurer`], so a
//! pixel surface can plug in its font metrics while the terminal surface
//! counts cells.

mod wrap;

pub use wrap::wrap_lines;

use unicode_width::UnicodeWidthChar;

use crate::style::TextStyle;

/// Measures text the way the target surface will paint it.
pub trait TextMeasurer: Send + Sync {
    /// Horizontal advance of `text`, including letter spacing.
    fn text_width(&self, text: &str, style: &TextStyle) -> f32;

    /// Height of one line of text.
    fn line_height(&self, style: &TextStyle) -> f32;
}

/// Measures in terminal cells.
///
/// Glyphs can't be scaled in a terminal, so each character advances by its
/// display width; the text size only scales letter spacing. A line is one
/// cell tall.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMeasurer;

impl CellMeasurer {
    /// Advance of a single character, spacing included.
    #[inline]
    pub fn advance(c: char, style: &TextStyle) -> f32 {
        c.width().unwrap_or(0) as f32 + style.letter_spacing * style.size
    }
}

impl TextMeasurer for CellMeasurer {
    fn text_width(&self, text: &str, style: &TextStyle) -> f32 {
        text.chars().map(|c| Self::advance(c, style)).sum()
    }

    fn line_height(&self, _style: &TextStyle) -> f32 {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_width() {
        let style = TextStyle::default();
        assert_eq!(CellMeasurer.text_width("hello", &style), 5.0);
        // CJK characters take two cells
        assert_eq!(CellMeasurer.text_width("新闻", &style), 4.0);
        assert_eq!(CellMeasurer.text_width("", &style), 0.0);
    }

    #[test]
    fn test_letter_spacing() {
        let style = TextStyle {
            letter_spacing: 0.5,
            size: 2.0,
            ..Default::default()
        };
        // each char gets 0.5 * 2.0 extra
        assert_eq!(CellMeasurer.text_width("abc", &style), 6.0);
        assert_eq!(CellMeasurer.line_height(&style), 1.0);
    }
}
