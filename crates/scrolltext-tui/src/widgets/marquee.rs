use ratatui::{buffer::Buffer, layout::Rect, Frame};
use scrolltext_core::{CellMeasurer, ScrollFrame};
use unicode_width::UnicodeWidthChar;

use crate::surface::TerminalSurface;
use crate::theme::to_color;

pub struct MarqueeWidget;

impl MarqueeWidget {
    /// Paint the surface's latest frame into `area` and record `area` as the
    /// surface viewport for the next tick
    pub fn render(frame: &mut Frame, area: Rect, surface: &TerminalSurface) {
        surface.resize(area);
        if let Some(scroll_frame) = surface.latest_frame() {
            Self::render_frame(&scroll_frame, area, frame.buffer_mut());
        }
    }

    /// Paint one frame. Glyphs that fall partly outside `area` are skipped.
    pub fn render_frame(scroll_frame: &ScrollFrame, area: Rect, buf: &mut Buffer) {
        let style = &scroll_frame.style;

        if let Some(bg) = to_color(style.background) {
            for y in area.top()..area.bottom() {
                for x in area.left()..area.right() {
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_bg(bg);
                    }
                }
            }
        }

        let row = scroll_frame.y.floor();
        if row < 0.0 || row >= area.height as f32 {
            return;
        }
        let y = area.y + row as u16;
        let fg = to_color(style.color);

        let mut pen = scroll_frame.x;
        for c in scroll_frame.text.chars() {
            let width = c.width().unwrap_or(0) as f32;
            let col = pen.floor();
            pen += CellMeasurer::advance(c, style);

            if width == 0.0 || col < 0.0 || col + width > area.width as f32 {
                continue;
            }
            if let Some(cell) = buf.cell_mut((area.x + col as u16, y)) {
                cell.set_char(c);
                if let Some(fg) = fg {
                    cell.set_fg(fg);
                }
            }
        }
    }
}
