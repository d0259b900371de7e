//! The scrolling text view: configuration, lifecycle and background tasks.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::{Orientation, ScrollTextConfig};
use crate::engine::ScrollEngine;
use crate::listener::{ListenerRegistry, ScrollListener};
use crate::metrics::{CellMeasurer, TextMeasurer};
use crate::scheduler::{current_runtime, run_ticker, run_timer, TaskHandle};
use crate::style::Argb;
use crate::surface::Surface;
use crate::Result;

/// State shared between the view and its background tasks
struct Shared {
    engine: Mutex<ScrollEngine>,
    listeners: ListenerRegistry,
    surface: Arc<dyn Surface>,
    measurer: Arc<dyn TextMeasurer>,
}

impl Shared {
    fn engine(&self) -> MutexGuard<'_, ScrollEngine> {
        self.engine
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// One redraw: advance under the lock, then draw and notify outside it
    fn tick(&self) {
        let viewport = self.surface.viewport();
        let outcome = self.engine().tick(viewport, self.measurer.as_ref());

        if let Some(frame) = &outcome.frame {
            if let Err(e) = self.surface.draw(frame) {
                warn!("Failed to draw scroll frame: {}", e);
            }
        }

        if let Some(count) = outcome.loop_completed {
            debug!(count, "Scroll loop completed");
            self.listeners.notify_loop_completion(count);
        }

        if outcome.finished {
            info!("Scrolling finished after loop limit");
            self.listeners.notify_finished();
        }
    }

    fn expire_duration(&self, generation: u64) {
        let finished = self.engine().finish_by_timer(generation);
        if finished {
            info!("Scrolling finished after duration");
            self.listeners.notify_finished();
        }
    }
}

#[derive(Default)]
struct Tasks {
    ticker: Option<TaskHandle>,
    timer: Option<TaskHandle>,
}

/// Text scrolling across an injected [`Surface`].
///
/// The host forwards its surface lifecycle: [`surface_created`](Self::surface_created)
/// starts the redraw task, [`surface_destroyed`](Self::surface_destroyed) and
/// [`detach`](Self::detach) tear down both background tasks. Dropping the view
/// does the same.
///
/// All methods take `&self`; the view can be shared behind an `Arc`.
pub struct ScrollTextView {
    shared: Arc<Shared>,
    tasks: Mutex<Tasks>,
}

impl ScrollTextView {
    /// Create a view that measures text in terminal cells
    pub fn new(config: ScrollTextConfig, surface: Arc<dyn Surface>) -> Result<Self> {
        Self::with_measurer(config, surface, Arc::new(CellMeasurer))
    }

    pub fn with_measurer(
        config: ScrollTextConfig,
        surface: Arc<dyn Surface>,
        measurer: Arc<dyn TextMeasurer>,
    ) -> Result<Self> {
        let engine = ScrollEngine::new(config)?;
        Ok(Self {
            shared: Arc::new(Shared {
                engine: Mutex::new(engine),
                listeners: ListenerRegistry::new(),
                surface,
                measurer,
            }),
            tasks: Mutex::new(Tasks::default()),
        })
    }

    fn engine(&self) -> MutexGuard<'_, ScrollEngine> {
        self.shared.engine()
    }

    fn tasks(&self) -> MutexGuard<'_, Tasks> {
        self.tasks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // --- lifecycle ---

    /// The host surface is ready: start the redraw task.
    ///
    /// Clears the stopped flag, and schedules the configured duration if no
    /// timer is pending. Must be called from within a tokio runtime.
    pub fn surface_created(&self) -> Result<()> {
        let (period, duration, generation) = {
            let mut engine = self.engine();
            engine.resume_surface();
            let config = engine.config();
            (config.tick_interval(), config.duration(), engine.timer_generation())
        };

        let mut tasks = self.tasks();
        if let Some(old) = tasks.ticker.take() {
            old.cancel();
        }

        let shared = self.shared.clone();
        tasks.ticker = Some(TaskHandle::spawn("ticker", move |shutdown| {
            run_ticker(period, shutdown, move || shared.tick())
        })?);
        debug!(period_ms = period.as_millis() as u64, "Surface created, scrolling started");

        let timer_pending = tasks.timer.as_ref().is_some_and(|t| !t.is_finished());
        if let Some(duration) = duration.filter(|_| !timer_pending) {
            tasks.timer = Some(self.spawn_timer(duration, generation)?);
        }

        Ok(())
    }

    /// The host surface is gone: stop scrolling and cancel both tasks
    pub fn surface_destroyed(&self) {
        self.engine().stop();
        self.cancel_tasks();
        debug!("Surface destroyed, scrolling stopped");
    }

    /// The view was removed from its window: cancel both tasks
    pub fn detach(&self) {
        self.cancel_tasks();
        if let Err(e) = self.shared.surface.clear() {
            warn!("Failed to clear surface on detach: {}", e);
        }
        debug!("View detached");
    }

    fn cancel_tasks(&self) {
        let mut tasks = self.tasks();
        if let Some(ticker) = tasks.ticker.take() {
            ticker.cancel();
        }
        if let Some(timer) = tasks.timer.take() {
            timer.cancel();
        }
        self.engine().cancel_timer();
    }

    /// Whether the redraw task is running
    pub fn is_running(&self) -> bool {
        self.tasks()
            .ticker
            .as_ref()
            .is_some_and(|t| !t.is_finished())
    }

    /// Run one animation tick on the calling thread.
    ///
    /// For hosts that drive their own frame loop instead of calling
    /// [`surface_created`](Self::surface_created).
    pub fn tick(&self) {
        self.shared.tick();
    }

    fn spawn_timer(&self, duration: Duration, generation: u64) -> Result<TaskHandle> {
        let shared = self.shared.clone();
        debug!(secs = duration.as_secs_f64(), generation, "Duration timer scheduled");
        TaskHandle::spawn("duration-timer", move |shutdown| {
            run_timer(duration, shutdown, move || shared.expire_duration(generation))
        })
    }

    // --- listeners ---

    /// Returns false if the listener was already registered
    pub fn add_listener(&self, listener: Arc<dyn ScrollListener>) -> bool {
        self.shared.listeners.add(listener)
    }

    /// Returns false if the listener wasn't registered
    pub fn remove_listener(&self, listener: &Arc<dyn ScrollListener>) -> bool {
        self.shared.listeners.remove(listener)
    }

    // --- pause ---

    pub fn pause(&self) {
        self.engine().set_paused(true);
    }

    pub fn resume(&self) {
        self.engine().set_paused(false);
    }

    pub fn is_paused(&self) -> bool {
        self.engine().is_paused()
    }

    /// Toggle pause when click-to-toggle is enabled. Returns true if toggled.
    pub fn click(&self) -> bool {
        self.engine().click()
    }

    // --- configuration ---

    /// Snapshot of the current configuration
    pub fn config(&self) -> ScrollTextConfig {
        self.engine().config().clone()
    }

    pub fn text(&self) -> String {
        self.engine().config().text.clone()
    }

    /// Replace the text; takes effect on the next tick and restarts scrolling
    pub fn set_text(&self, text: impl Into<String>) {
        self.engine().set_text(text);
    }

    pub fn text_size(&self) -> f32 {
        self.engine().config().text_size
    }

    /// Sizes below the minimum are clamped
    pub fn set_text_size(&self, size: f32) {
        self.engine().set_text_size(size);
    }

    pub fn text_color(&self) -> Argb {
        self.engine().config().text_color
    }

    pub fn set_text_color(&self, color: Argb) {
        self.engine().set_text_color(color);
    }

    pub fn background_color(&self) -> Argb {
        self.engine().config().background_color
    }

    pub fn set_background_color(&self, color: Argb) {
        self.engine().set_background_color(color);
    }

    pub fn speed(&self) -> u32 {
        self.engine().config().speed
    }

    pub fn set_speed(&self, speed: u32) -> Result<()> {
        self.engine().set_speed(speed)
    }

    pub fn letter_spacing(&self) -> f32 {
        self.engine().config().letter_spacing
    }

    pub fn set_letter_spacing(&self, spacing: f32) {
        self.engine().set_letter_spacing(spacing);
    }

    pub fn padding(&self) -> f32 {
        self.engine().config().padding
    }

    pub fn set_padding(&self, padding: f32) {
        self.engine().set_padding(padding);
    }

    pub fn orientation(&self) -> Orientation {
        self.engine().config().orientation
    }

    pub fn set_orientation(&self, orientation: Orientation) {
        self.engine().set_orientation(orientation);
    }

    pub fn is_horizontal(&self) -> bool {
        self.engine().config().is_horizontal()
    }

    pub fn set_horizontal(&self, horizontal: bool) {
        let orientation = if horizontal {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        self.set_orientation(orientation);
    }

    pub fn loop_limit(&self) -> Option<u32> {
        self.engine().config().loop_count
    }

    /// Scroll `times` loops, then finish. Rejects non-positive counts and
    /// cancels a pending duration timer.
    pub fn set_loop_count(&self, times: i64) -> Result<()> {
        self.engine().set_loop_count(times)?;
        if let Some(timer) = self.tasks().timer.take() {
            timer.cancel();
        }
        Ok(())
    }

    pub fn duration(&self) -> Option<Duration> {
        self.engine().config().duration()
    }

    /// Scroll for `duration`, then finish. Cancels and replaces any pending
    /// timer, and clears the loop limit.
    ///
    /// Fails without changing anything when called outside a tokio runtime.
    pub fn set_duration(&self, duration: Duration) -> Result<()> {
        current_runtime()?;
        let generation = self.engine().set_duration(duration)?;

        let mut tasks = self.tasks();
        if let Some(old) = tasks.timer.take() {
            old.cancel();
        }
        tasks.timer = Some(self.spawn_timer(duration, generation)?);
        Ok(())
    }

    pub fn is_scroll_forever(&self) -> bool {
        self.engine().config().scroll_forever
    }

    pub fn set_scroll_forever(&self, forever: bool) {
        self.engine().set_scroll_forever(forever);
    }

    pub fn is_click_enabled(&self) -> bool {
        self.engine().config().click_enable
    }

    pub fn set_click_enabled(&self, enable: bool) {
        self.engine().set_click_enable(enable);
    }

    // --- state ---

    pub fn offset(&self) -> f32 {
        self.engine().offset()
    }

    pub fn loop_count(&self) -> u32 {
        self.engine().loop_count()
    }

    pub fn is_stopped(&self) -> bool {
        self.engine().is_stopped()
    }

    /// Height the view wants: one line plus padding above and below
    pub fn measured_height(&self) -> f32 {
        let viewport = self.shared.surface.viewport();
        self.engine()
            .measured_height(viewport, self.shared.measurer.as_ref())
    }
}

impl Drop for ScrollTextView {
    fn drop(&mut self) {
        self.cancel_tasks();
    }
}
