use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders},
    Frame, Terminal,
};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

use scrolltext_core::{AppConfig, ChannelListener, Orientation, ScrollEvent, ScrollTextView};
use scrolltext_tui::{
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action},
    widgets::{MarqueeWidget, ScrollStatus, StatusBarWidget},
    TerminalSurface, Theme,
};

/// Repaint interval of the UI loop; independent of the scroll tick
const FRAME_MS: u64 = 33;

pub async fn run(config: AppConfig) -> Result<()> {
    let surface = Arc::new(TerminalSurface::new());
    let view = ScrollTextView::new(config.scroll.clone(), surface.clone())?;

    let (listener, mut events) = ChannelListener::channel();
    view.add_listener(listener);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("scrolltext"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &view, &surface, &mut events).await;

    // Restore terminal even if the loop failed
    view.detach();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    view: &ScrollTextView,
    surface: &TerminalSurface,
    events: &mut UnboundedReceiver<ScrollEvent>,
) -> Result<()> {
    let theme = Theme::default();
    let event_handler = EventHandler::new(FRAME_MS);
    let mut message: Option<String> = None;

    // Paint once so the surface knows its viewport before the first tick
    terminal.draw(|frame| draw(frame, view, surface, None, &theme))?;
    view.surface_created()?;
    info!(text = %view.text(), "Scrolling started");

    loop {
        // Drain listener notifications (non-blocking)
        while let Ok(event) = events.try_recv() {
            match event {
                ScrollEvent::LoopCompleted { count } => {
                    info!(count, "Loop completed");
                }
                ScrollEvent::Finished => {
                    message = Some("Finished. r:restart q:quit".to_string());
                }
            }
        }

        terminal.draw(|frame| draw(frame, view, surface, message.as_deref(), &theme))?;

        let key = match event_handler.next()? {
            Some(AppEvent::Key(key)) => key,
            Some(AppEvent::Resize(width, height)) => {
                handle_resize(terminal, width, height)?;
                continue;
            }
            Some(AppEvent::Frame) | None => continue,
        };

        match handle_key_event(key) {
            Action::Quit => break,
            Action::Click => {
                if !view.click() {
                    message = Some("Click-to-toggle is off (start with --click), p pauses".to_string());
                }
            }
            Action::TogglePause => {
                if view.is_paused() {
                    view.resume();
                } else {
                    view.pause();
                }
            }
            Action::Restart => {
                view.set_text(view.text());
                // re-arm the duration timer, it fired on the previous run
                if let Some(duration) = view.duration() {
                    view.set_duration(duration)?;
                }
                message = None;
            }
            Action::SpeedUp => change_speed(view, 1, &mut message),
            Action::SpeedDown => change_speed(view, -1, &mut message),
            Action::ToggleOrientation => {
                let next = match view.orientation() {
                    Orientation::Horizontal => Orientation::Vertical,
                    Orientation::Vertical => Orientation::Horizontal,
                };
                view.set_orientation(next);
            }
            Action::None => {}
        }
    }

    view.surface_destroyed();
    Ok(())
}

/// Resize the terminal buffers; the marquee picks up its new area on the next draw
fn handle_resize<B: Backend>(terminal: &mut Terminal<B>, width: u16, height: u16) -> Result<()> {
    debug!(width, height, "Terminal resized");
    terminal.autoresize()?;
    Ok(())
}

fn change_speed(view: &ScrollTextView, delta: i64, message: &mut Option<String>) {
    let speed = (view.speed() as i64 + delta).max(0) as u32;
    match view.set_speed(speed) {
        Ok(()) => *message = None,
        Err(e) => {
            warn!("Speed change rejected: {}", e);
            *message = Some(e.to_string());
        }
    }
}

fn marquee_layout(area: Rect, marquee_height: u16) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(marquee_height + 2), // Marquee + border
            Constraint::Fill(1),
            Constraint::Length(1), // Status bar
        ])
        .split(area);
    (chunks[1], chunks[3])
}

fn draw(
    frame: &mut Frame,
    view: &ScrollTextView,
    surface: &TerminalSurface,
    message: Option<&str>,
    theme: &Theme,
) {
    let height = view.measured_height().ceil().max(1.0) as u16;
    let (marquee_area, status_area) = marquee_layout(frame.area(), height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.grey))
        .title(" scrolltext ");
    let inner = block.inner(marquee_area);
    frame.render_widget(block, marquee_area);

    MarqueeWidget::render(frame, inner, surface);
    StatusBarWidget::render(frame, status_area, &ScrollStatus::from_view(view), message, theme);
}
