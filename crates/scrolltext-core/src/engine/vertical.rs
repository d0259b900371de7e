use super::layout::LayoutMetrics;

/// Position of the line currently moving up through the view.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct VerticalCursor {
    line: usize,
    /// Top of the current line; `None` until the line enters the view
    y: Option<f32>,
    hold_ticks: u32,
}

/// Result of advancing the cursor by one tick
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct VerticalStep {
    pub line: usize,
    pub y: f32,
    /// The last line has left the view
    pub loop_completed: bool,
}

impl VerticalCursor {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Report where to paint the current line, then move it.
    ///
    /// A line enters at the bottom edge and moves up by `step` per tick. When
    /// it crosses the vertical center it is snapped there and rests for
    /// `hold_ticks` ticks. Once it is above the top edge the next line enters.
    pub fn advance(&mut self, layout: &LayoutMetrics, step: f32, hold_ticks: u32) -> Option<VerticalStep> {
        if layout.lines.is_empty() {
            return None;
        }
        if self.line >= layout.lines.len() {
            self.reset();
        }

        let y = *self.y.get_or_insert(layout.view_height);
        let line = self.line;

        if self.hold_ticks > 0 {
            self.hold_ticks -= 1;
            return Some(VerticalStep { line, y, loop_completed: false });
        }

        let center = layout.text_y;
        let mut next = y - step.max(f32::EPSILON);
        if y > center && next <= center {
            next = center;
            self.hold_ticks = hold_ticks;
        }

        let mut loop_completed = false;
        if next <= -layout.line_height {
            self.line += 1;
            self.y = None;
            if self.line >= layout.lines.len() {
                self.line = 0;
                loop_completed = true;
            }
        } else {
            self.y = Some(next);
        }

        Some(VerticalStep { line, y, loop_completed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(lines: &[&str], view_height: f32) -> LayoutMetrics {
        LayoutMetrics {
            line_height: 1.0,
            view_height,
            text_y: (view_height - 1.0) / 2.0,
            lines: lines.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_line_enters_at_bottom_and_holds_at_center() {
        let layout = layout(&["one"], 5.0);
        let mut cursor = VerticalCursor::default();

        let ys: Vec<f32> = (0..6)
            .map(|_| cursor.advance(&layout, 1.0, 2).unwrap().y)
            .collect();
        // 5 -> 4 -> 3 -> 2 (center) held two extra ticks, then moves on
        assert_eq!(ys, vec![5.0, 4.0, 3.0, 2.0, 2.0, 2.0]);
        assert_eq!(cursor.advance(&layout, 1.0, 2).unwrap().y, 1.0);
    }

    #[test]
    fn test_loop_completes_after_last_line() {
        let layout = layout(&["a", "b"], 1.0);
        let mut cursor = VerticalCursor::default();

        let steps: Vec<VerticalStep> = (0..4)
            .map(|_| cursor.advance(&layout, 1.0, 0).unwrap())
            .collect();

        // each line: y=1 (enters, snaps to center 0), y=0 (leaves)
        assert_eq!(steps.iter().map(|s| s.line).collect::<Vec<_>>(), vec![0, 0, 1, 1]);
        assert_eq!(
            steps.iter().map(|s| s.loop_completed).collect::<Vec<_>>(),
            vec![false, false, false, true]
        );
    }

    #[test]
    fn test_no_lines_no_step() {
        let mut cursor = VerticalCursor::default();
        assert!(cursor.advance(&layout(&[], 3.0), 1.0, 0).is_none());
    }
}
