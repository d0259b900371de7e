//! The drawing surface the widget scrolls across.

use crate::style::TextStyle;
use crate::Result;

/// Size of the drawable area in surface units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// One painted frame: clear the surface, then draw `text` with its top-left
/// corner at (`x`, `y`).
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollFrame {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub style: TextStyle,
}

/// Drawing capability injected into the view.
///
/// Called from the redraw task, never while the view's state lock is held.
pub trait Surface: Send + Sync {
    /// Current drawable size. Read at every tick; a change triggers a re-layout.
    fn viewport(&self) -> Viewport;

    /// Replace whatever is on the surface with `frame`.
    fn draw(&self, frame: &ScrollFrame) -> Result<()>;

    /// Erase the surface.
    fn clear(&self) -> Result<()>;
}
