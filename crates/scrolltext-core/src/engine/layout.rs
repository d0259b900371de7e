use crate::config::{Orientation, ScrollTextConfig};
use crate::metrics::{wrap_lines, TextMeasurer};
use crate::surface::Viewport;

/// Metrics derived from the configuration and the viewport.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutMetrics {
    pub text_width: f32,
    pub line_height: f32,
    pub view_width: f32,
    pub view_height: f32,
    /// `ceil(line_height) + 2 * padding`, the height the widget asks for
    pub measured_height: f32,
    /// Offset at which the text has fully left the view
    pub wrap_threshold: f32,
    /// Top of a vertically centered line
    pub text_y: f32,
    /// Wrapped lines, vertical mode only
    pub lines: Vec<String>,
}

impl LayoutMetrics {
    pub fn compute(
        config: &ScrollTextConfig,
        viewport: Viewport,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let style = config.text_style();
        let text_width = measurer.text_width(&config.text, &style);
        let line_height = measurer.line_height(&style);
        let measured_height = line_height.ceil() + 2.0 * config.padding;

        // an unmeasured surface still gets a sensible layout
        let view_height = if viewport.height > 0.0 {
            viewport.height
        } else {
            measured_height
        };
        let view_width = viewport.width.max(0.0);

        let lines = match config.orientation {
            Orientation::Horizontal => Vec::new(),
            Orientation::Vertical => wrap_lines(&config.text, view_width, measurer, &style),
        };

        Self {
            text_width,
            line_height,
            view_width,
            view_height,
            measured_height,
            wrap_threshold: view_width + text_width,
            text_y: (view_height - line_height) / 2.0,
            lines,
        }
    }
}
