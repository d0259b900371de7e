//! Scroll animation engine
//!
//! Pure, synchronous tick logic. The engine owns the widget configuration and
//! the scroll state; each call to [`ScrollEngine::tick`] advances the animation
//! by one step and reports what to paint and whom to notify. It never sleeps,
//! spawns or draws, so the redraw task and the tests drive it the same way.
//!
//! - `layout` - derived metrics (text width, wrap threshold, wrapped lines)
//! - `vertical` - line-by-line cursor used in vertical mode
//! - `state` - the engine itself
//!
//! ```ignore
//! let mut engine = ScrollEngine::new(config);
//! let outcome = engine.tick(surface.viewport(), &CellMeasurer);
//! if let Some(frame) = outcome.frame {
//!     surface.draw(&frame)?;
//! }
//! ```

mod layout;
mod state;
mod vertical;

pub use layout::LayoutMetrics;
pub use state::{ScrollEngine, TickOutcome};
