//! Background tasks: the redraw ticker and the one-shot duration timer.

mod task;
mod ticker;
mod timer;

pub(crate) use task::current_runtime;
pub use task::TaskHandle;
pub use ticker::run_ticker;
pub use timer::run_timer;
