//! Colors and the text style handed to measurers and surfaces.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// A color in `0xAARRGGBB` form.
///
/// Serialized as a hex string. Accepts `#RGB`, `#RRGGBB` (opaque) and
/// `#AARRGGBB`; the leading `#` is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Argb(pub u32);

impl Argb {
    pub const TRANSPARENT: Argb = Argb(0x0000_0000);
    pub const BLACK: Argb = Argb(0xff00_0000);
    pub const WHITE: Argb = Argb(0xffff_ffff);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Argb(0xff00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    #[inline]
    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub fn blue(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub fn is_transparent(self) -> bool {
        self.alpha() == 0
    }
}

impl FromStr for Argb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let invalid = || Error::InvalidColor(s.to_string());

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match hex.len() {
            // RGB -> RRGGBB
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).map_err(|_| invalid())? * 17;
                let g = u8::from_str_radix(&hex[1..2], 16).map_err(|_| invalid())? * 17;
                let b = u8::from_str_radix(&hex[2..3], 16).map_err(|_| invalid())? * 17;
                Ok(Argb::from_rgb(r, g, b))
            }
            6 => {
                let rgb = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
                Ok(Argb(0xff00_0000 | rgb))
            }
            8 => Ok(Argb(u32::from_str_radix(hex, 16).map_err(|_| invalid())?)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alpha() == 0xff {
            write!(f, "#{:06x}", self.0 & 0x00ff_ffff)
        } else {
            write!(f, "#{:08x}", self.0)
        }
    }
}

impl TryFrom<String> for Argb {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Argb> for String {
    fn from(color: Argb) -> Self {
        color.to_string()
    }
}

/// Everything needed to measure and paint the scrolling text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Text size in surface units
    pub size: f32,
    /// Extra advance after each character, in ems of `size`
    pub letter_spacing: f32,
    pub color: Argb,
    pub background: Argb,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 1.0,
            letter_spacing: 0.0,
            color: Argb::WHITE,
            background: Argb::TRANSPARENT,
        }
    }
}
