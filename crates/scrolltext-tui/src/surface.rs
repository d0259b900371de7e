use std::sync::{Mutex, MutexGuard};

use ratatui::layout::Rect;
use tracing::debug;

use scrolltext_core::{Result, ScrollFrame, Surface, Viewport};

/// Surface backed by the terminal.
///
/// The redraw task stores the latest frame here; the UI loop paints it with
/// [`MarqueeWidget`](crate::widgets::MarqueeWidget) and reports the area it
/// painted into through [`resize`](Self::resize).
#[derive(Default)]
pub struct TerminalSurface {
    viewport: Mutex<Viewport>,
    frame: Mutex<Option<ScrollFrame>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the viewport to the size of `area`
    pub fn resize(&self, area: Rect) {
        let viewport = Viewport::new(area.width as f32, area.height as f32);
        let mut current = lock(&self.viewport);
        if *current != viewport {
            debug!(width = area.width, height = area.height, "Terminal surface resized");
            *current = viewport;
        }
    }

    pub fn latest_frame(&self) -> Option<ScrollFrame> {
        lock(&self.frame).clone()
    }
}

impl Surface for TerminalSurface {
    fn viewport(&self) -> Viewport {
        *lock(&self.viewport)
    }

    fn draw(&self, frame: &ScrollFrame) -> Result<()> {
        *lock(&self.frame) = Some(frame.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *lock(&self.frame) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrolltext_core::TextStyle;

    #[test]
    fn test_keeps_latest_frame() {
        let surface = TerminalSurface::new();
        surface.resize(Rect::new(2, 3, 40, 1));
        assert_eq!(surface.viewport(), Viewport::new(40.0, 1.0));

        for x in [40.0, 37.0] {
            surface
                .draw(&ScrollFrame {
                    text: "news".into(),
                    x,
                    y: 0.0,
                    style: TextStyle::default(),
                })
                .unwrap();
        }
        assert_eq!(surface.latest_frame().unwrap().x, 37.0);

        surface.clear().unwrap();
        assert!(surface.latest_frame().is_none());
    }
}
