use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::style::{Argb, TextStyle};
use crate::{Error, Result};

pub const MIN_SPEED: u32 = 1;
pub const MAX_SPEED: u32 = 30;
pub const MIN_TEXT_SIZE: f32 = 0.1;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scroll: ScrollTextConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Widget configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollTextConfig {
    /// Text to scroll
    #[serde(default)]
    pub text: String,
    /// Text size in surface units
    #[serde(default = "default_text_size")]
    pub text_size: f32,
    #[serde(default = "default_text_color")]
    pub text_color: Argb,
    #[serde(default = "default_background_color")]
    pub background_color: Argb,
    #[serde(default)]
    pub orientation: Orientation,
    /// Offset advance per tick, 1..=30
    #[serde(default = "default_speed")]
    pub speed: u32,
    /// Extra advance after each character, in ems of the text size
    #[serde(default)]
    pub letter_spacing: f32,
    /// Padding above and below the text line
    #[serde(default)]
    pub padding: f32,
    /// Number of loops before finishing (only honored when `scroll_forever` is false)
    #[serde(default)]
    pub loop_count: Option<u32>,
    /// Stop and finish after this many seconds
    #[serde(default)]
    pub duration_secs: Option<u64>,
    #[serde(default = "default_true")]
    pub scroll_forever: bool,
    /// Clicking toggles pause
    #[serde(default)]
    pub click_enable: bool,
    /// Redraw period in milliseconds
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    /// How long a vertical line rests at the center, in milliseconds
    #[serde(default = "default_line_hold")]
    pub line_hold_ms: u64,
    /// Vertical movement per tick
    #[serde(default = "default_vertical_step")]
    pub vertical_step: f32,
}

impl Default for ScrollTextConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            text_size: default_text_size(),
            text_color: default_text_color(),
            background_color: default_background_color(),
            orientation: Orientation::default(),
            speed: default_speed(),
            letter_spacing: 0.0,
            padding: 0.0,
            loop_count: None,
            duration_secs: None,
            scroll_forever: default_true(),
            click_enable: false,
            tick_interval_ms: default_tick_interval(),
            line_hold_ms: default_line_hold(),
            vertical_step: default_vertical_step(),
        }
    }
}

impl ScrollTextConfig {
    /// Reject values the setters would reject and clamp the text size.
    pub fn validated(mut self) -> Result<Self> {
        validate_speed(self.speed)?;
        if let Some(count) = self.loop_count {
            if count == 0 {
                return Err(Error::InvalidLoopCount(0));
            }
        }
        if self.duration_secs == Some(0) {
            return Err(Error::InvalidDuration);
        }
        if self.tick_interval_ms == 0 {
            return Err(Error::InvalidTickInterval(0));
        }
        // a duration replaces any loop limit
        if self.duration_secs.is_some() {
            self.loop_count = None;
        }
        self.text_size = clamp_text_size(self.text_size);
        Ok(self)
    }

    pub fn text_style(&self) -> TextStyle {
        TextStyle {
            size: self.text_size,
            letter_spacing: self.letter_spacing,
            color: self.text_color,
            background: self.background_color,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration_secs.map(Duration::from_secs)
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.orientation == Orientation::Horizontal
    }

    /// Number of ticks a vertical line rests at the center.
    pub fn line_hold_ticks(&self) -> u32 {
        if self.tick_interval_ms == 0 {
            return 0;
        }
        self.line_hold_ms.div_ceil(self.tick_interval_ms) as u32
    }
}

pub fn validate_speed(speed: u32) -> Result<()> {
    if (MIN_SPEED..=MAX_SPEED).contains(&speed) {
        Ok(())
    } else {
        Err(Error::InvalidSpeed {
            value: speed,
            min: MIN_SPEED,
            max: MAX_SPEED,
        })
    }
}

pub fn clamp_text_size(size: f32) -> f32 {
    if size.is_nan() {
        return MIN_TEXT_SIZE;
    }
    size.max(MIN_TEXT_SIZE)
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scrolltext")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_text_size() -> f32 {
    1.0
}

fn default_text_color() -> Argb {
    Argb::WHITE
}

fn default_background_color() -> Argb {
    Argb::TRANSPARENT
}

fn default_speed() -> u32 {
    3
}

fn default_tick_interval() -> u64 {
    100
}

fn default_line_hold() -> u64 {
    3000
}

fn default_vertical_step() -> f32 {
    1.0
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default file or return defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, falling back to defaults when it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let path = expand_tilde(path);
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        Ok(Self {
            general: config.general,
            scroll: config.scroll.validated()?,
        })
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Save configuration to the default file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Always uses ~/.config/scrolltext/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("scrolltext")
            .join("config.toml")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("scrolltext.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}
