use super::TextMeasurer;
use crate::style::TextStyle;

/// Break `text` into lines no wider than `max_width`.
///
/// Greedy fit over characters: each line takes the longest prefix whose
/// measured width is `<= max_width`, and always at least one character so
/// that a glyph wider than the view still makes progress.
pub fn wrap_lines(
    text: &str,
    max_width: f32,
    measurer: &dyn TextMeasurer,
    style: &TextStyle,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        current.push(c);
        if current.chars().count() > 1 && measurer.text_width(&current, style) > max_width {
            current.pop();
            lines.push(std::mem::take(&mut current));
            current.push(c);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
