pub mod event;
pub mod input;
pub mod surface;
pub mod theme;
pub mod widgets;

pub use surface::TerminalSurface;
pub use theme::Theme;
