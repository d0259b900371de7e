pub mod config;
pub mod engine;
pub mod error;
pub mod listener;
pub mod metrics;
pub mod scheduler;
pub mod style;
pub mod surface;
pub mod view;

pub use config::{AppConfig, Orientation, ScrollTextConfig};
pub use engine::{ScrollEngine, TickOutcome};
pub use error::{Error, Result};
pub use listener::{ChannelListener, ListenerRegistry, ScrollEvent, ScrollListener};
pub use metrics::{CellMeasurer, TextMeasurer};
pub use style::{Argb, TextStyle};
pub use surface::{ScrollFrame, Surface, Viewport};
pub use view::ScrollTextView;
