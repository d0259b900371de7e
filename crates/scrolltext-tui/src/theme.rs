use ratatui::style::Color;
use scrolltext_core::Argb;

/// Colors for the chrome around the marquee
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub grey: Color,
    pub running: Color,
    pub paused: Color,
    pub finished: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Dark
        Self {
            bg: Color::Rgb(0x45, 0x40, 0x3d),
            fg: Color::Rgb(0xd4, 0xbe, 0x98),
            grey: Color::Rgb(0xa8, 0x99, 0x84),
            running: Color::Rgb(0xa9, 0xb6, 0x65),
            paused: Color::Rgb(0xd8, 0xa6, 0x57),
            finished: Color::Rgb(0xea, 0x69, 0x62),
        }
    }
}

/// Map a widget color to a terminal color. Fully transparent maps to `None`
/// (leave the cell as is); any other alpha is treated as opaque.
pub fn to_color(color: Argb) -> Option<Color> {
    if color.is_transparent() {
        None
    } else {
        Some(Color::Rgb(color.red(), color.green(), color.blue()))
    }
}
