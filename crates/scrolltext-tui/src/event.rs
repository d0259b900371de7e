use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Event handler for terminal events
pub struct EventHandler {
    frame_rate: Duration,
}

impl EventHandler {
    pub fn new(frame_ms: u64) -> Self {
        Self {
            frame_rate: Duration::from_millis(frame_ms),
        }
    }

    /// Wait up to one frame for the next event
    pub fn next(&self) -> Result<Option<AppEvent>> {
        if event::poll(self.frame_rate)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Frame))
        }
    }
}

/// Terminal events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// No input within one frame; repaint
    Frame,
}
