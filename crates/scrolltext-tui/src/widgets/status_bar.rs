use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use scrolltext_core::ScrollTextView;

use crate::theme::Theme;

/// Snapshot of the view state shown in the status line
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollStatus {
    pub loop_count: u32,
    pub loop_limit: Option<u32>,
    pub speed: u32,
    pub paused: bool,
    pub stopped: bool,
    /// Space toggles pause only when click-to-toggle is on
    pub click_enabled: bool,
}

impl ScrollStatus {
    pub fn from_view(view: &ScrollTextView) -> Self {
        Self {
            loop_count: view.loop_count(),
            loop_limit: view.loop_limit(),
            speed: view.speed(),
            paused: view.is_paused(),
            stopped: view.is_stopped(),
            click_enabled: view.is_click_enabled(),
        }
    }

    pub fn state_label(&self) -> &'static str {
        if self.stopped {
            "FINISHED"
        } else if self.paused {
            "PAUSED"
        } else {
            "RUNNING"
        }
    }

    fn help_hint(&self) -> &'static str {
        if self.click_enabled {
            " space/p:pause q:quit "
        } else {
            " p:pause q:quit "
        }
    }

    fn loops_label(&self) -> String {
        match self.loop_limit {
            Some(limit) => format!("Loops: {}/{}", self.loop_count, limit),
            None => format!("Loops: {}", self.loop_count),
        }
    }
}

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        status: &ScrollStatus,
        message: Option<&str>,
        theme: &Theme,
    ) {
        let state_color = if status.stopped {
            theme.finished
        } else if status.paused {
            theme.paused
        } else {
            theme.running
        };

        let status_text = match message {
            Some(msg) => format!(" {}", msg),
            None => format!(" {} | Speed: {}", status.loops_label(), status.speed),
        };
        let state_text = format!(" {} ", status.state_label());

        let help_hint = status.help_hint();
        let padding_len = area.width.saturating_sub(
            (state_text.len() + status_text.len() + help_hint.len()) as u16,
        ) as usize;

        let line = Line::from(vec![
            Span::styled(
                state_text,
                Style::default()
                    .fg(theme.bg)
                    .bg(state_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(status_text, Style::default().fg(theme.fg).bg(theme.bg)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg)),
            Span::styled(help_hint, Style::default().fg(theme.grey).bg(theme.bg)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
