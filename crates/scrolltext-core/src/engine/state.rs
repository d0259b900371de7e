use std::time::Duration;

use tracing::debug;

use super::layout::LayoutMetrics;
use super::vertical::VerticalCursor;
use crate::config::{clamp_text_size, validate_speed, Orientation, ScrollTextConfig};
use crate::metrics::TextMeasurer;
use crate::style::Argb;
use crate::surface::{ScrollFrame, Viewport};
use crate::{Error, Result};

/// What a tick produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Frame to paint, `None` when nothing should be drawn
    pub frame: Option<ScrollFrame>,
    /// Loop count after a loop completed on this tick
    pub loop_completed: Option<u32>,
    /// Scrolling finished on this tick
    pub finished: bool,
}

impl TickOutcome {
    fn idle() -> Self {
        Self::default()
    }
}

/// Scroll state machine
///
/// Owns the configuration and everything derived from it. Setters mark the
/// layout dirty; the next [`tick`](Self::tick) re-measures before moving.
#[derive(Debug, Clone)]
pub struct ScrollEngine {
    config: ScrollTextConfig,
    /// `None` when the layout must be recomputed
    layout: Option<LayoutMetrics>,
    viewport: Viewport,
    offset: f32,
    loop_count: u32,
    stopped: bool,
    paused: bool,
    finished: bool,
    vertical: VerticalCursor,
    /// Bumped whenever a pending duration timer becomes stale
    timer_generation: u64,
}

impl ScrollEngine {
    /// Create an engine; the config is validated and the text size clamped
    pub fn new(config: ScrollTextConfig) -> Result<Self> {
        Ok(Self {
            config: config.validated()?,
            layout: None,
            viewport: Viewport::default(),
            offset: 0.0,
            loop_count: 0,
            stopped: false,
            paused: false,
            finished: false,
            vertical: VerticalCursor::default(),
            timer_generation: 0,
        })
    }

    pub fn config(&self) -> &ScrollTextConfig {
        &self.config
    }

    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    #[inline]
    pub fn loop_count(&self) -> u32 {
        self.loop_count
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Re-measure on the next tick
    fn invalidate(&mut self) {
        self.layout = None;
    }

    /// Move the text back to its starting position
    fn rewind(&mut self) {
        self.offset = 0.0;
        self.vertical.reset();
    }

    /// Forget progress and allow scrolling (and finishing) again
    fn restart(&mut self) {
        self.rewind();
        self.loop_count = 0;
        self.stopped = false;
        self.finished = false;
    }

    // --- configuration ---

    /// Replace the text. Resets the offset and the loop count and clears the
    /// stopped flag.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.config.text = text.into();
        self.restart();
        self.invalidate();
    }

    pub fn set_text_size(&mut self, size: f32) {
        self.config.text_size = clamp_text_size(size);
        self.rewind();
        self.invalidate();
    }

    pub fn set_text_color(&mut self, color: Argb) {
        self.config.text_color = color;
    }

    pub fn set_background_color(&mut self, color: Argb) {
        self.config.background_color = color;
    }

    pub fn set_speed(&mut self, speed: u32) -> Result<()> {
        validate_speed(speed)?;
        self.config.speed = speed;
        Ok(())
    }

    pub fn set_letter_spacing(&mut self, spacing: f32) {
        self.config.letter_spacing = spacing;
        self.rewind();
        self.invalidate();
    }

    pub fn set_padding(&mut self, padding: f32) {
        self.config.padding = padding;
        self.invalidate();
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.config.orientation != orientation {
            self.config.orientation = orientation;
            self.rewind();
            self.invalidate();
        }
    }

    pub fn set_scroll_forever(&mut self, forever: bool) {
        self.config.scroll_forever = forever;
    }

    pub fn set_click_enable(&mut self, enable: bool) {
        self.config.click_enable = enable;
    }

    /// Scroll `times` loops, then finish. Turns off scrolling forever and
    /// invalidates any pending duration timer.
    pub fn set_loop_count(&mut self, times: i64) -> Result<u32> {
        if times <= 0 {
            return Err(Error::InvalidLoopCount(times));
        }
        let times = u32::try_from(times).unwrap_or(u32::MAX);

        self.timer_generation += 1;
        self.config.duration_secs = None;
        self.config.loop_count = Some(times);
        self.config.scroll_forever = false;
        self.restart();
        debug!(times, "Loop limit set");
        Ok(times)
    }

    /// Scroll for `duration`, then finish. Clears any loop limit and returns
    /// the generation the new timer must present to
    /// [`finish_by_timer`](Self::finish_by_timer).
    pub fn set_duration(&mut self, duration: Duration) -> Result<u64> {
        if duration.is_zero() {
            return Err(Error::InvalidDuration);
        }
        // sub-second durations round up to whole seconds in the config
        self.config.duration_secs = Some(duration.as_secs() + u64::from(duration.subsec_nanos() > 0));
        self.config.loop_count = None;
        self.timer_generation += 1;
        self.restart();
        Ok(self.timer_generation)
    }

    /// Generation a timer for the configured duration should carry
    pub fn timer_generation(&self) -> u64 {
        self.timer_generation
    }

    /// Make any pending duration timer stale
    pub fn cancel_timer(&mut self) {
        self.timer_generation += 1;
    }

    /// Called when a duration timer fires. Returns true if the engine
    /// finished because of it, false if the timer was stale or scrolling had
    /// already finished.
    pub fn finish_by_timer(&mut self, generation: u64) -> bool {
        if generation != self.timer_generation || self.finished {
            return false;
        }
        self.stopped = true;
        self.finished = true;
        true
    }

    // --- lifecycle ---

    /// The surface came (back) up: scrolling may run again
    pub fn resume_surface(&mut self) {
        self.stopped = false;
        self.finished = false;
        self.invalidate();
    }

    /// The surface went away
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Toggle pause if click-to-toggle is enabled. Returns true if toggled.
    pub fn click(&mut self) -> bool {
        if !self.config.click_enable {
            return false;
        }
        self.paused = !self.paused;
        true
    }

    // --- animation ---

    fn ensure_layout(&mut self, viewport: Viewport, measurer: &dyn TextMeasurer) {
        if self.layout.is_some() && self.viewport == viewport {
            return;
        }
        let layout = LayoutMetrics::compute(&self.config, viewport, measurer);
        if layout.wrap_threshold > 0.0 && self.offset >= layout.wrap_threshold {
            self.offset %= layout.wrap_threshold;
        }
        self.viewport = viewport;
        self.layout = Some(layout);
    }

    /// Height the widget wants for its current text, computing the layout if needed
    pub fn measured_height(&mut self, viewport: Viewport, measurer: &dyn TextMeasurer) -> f32 {
        self.ensure_layout(viewport, measurer);
        self.layout.as_ref().map(|l| l.measured_height).unwrap_or_default()
    }

    fn limit_reached(&self) -> bool {
        match self.config.loop_count {
            Some(limit) if !self.config.scroll_forever => self.loop_count >= limit,
            _ => false,
        }
    }

    /// Advance the animation by one tick
    pub fn tick(&mut self, viewport: Viewport, measurer: &dyn TextMeasurer) -> TickOutcome {
        self.ensure_layout(viewport, measurer);

        if self.stopped || self.paused || self.config.text.is_empty() {
            return TickOutcome::idle();
        }

        let mut outcome = match self.config.orientation {
            Orientation::Horizontal => self.tick_horizontal(),
            Orientation::Vertical => self.tick_vertical(),
        };

        if self.limit_reached() && !self.finished {
            self.stopped = true;
            self.finished = true;
            outcome.finished = true;
        }

        outcome
    }

    fn frame(&self, text: &str, x: f32, y: f32) -> ScrollFrame {
        ScrollFrame {
            text: text.to_string(),
            x,
            y,
            style: self.config.text_style(),
        }
    }

    fn tick_horizontal(&mut self) -> TickOutcome {
        let Some(layout) = self.layout.as_ref() else {
            return TickOutcome::idle();
        };
        let threshold = layout.wrap_threshold;
        if threshold <= 0.0 {
            return TickOutcome::idle();
        }

        let frame = self.frame(&self.config.text, layout.view_width - self.offset, layout.text_y);

        self.offset += self.config.speed as f32;
        let mut loop_completed = None;
        if self.offset >= threshold {
            self.offset %= threshold;
            self.loop_count = self.loop_count.saturating_add(1);
            loop_completed = Some(self.loop_count);
        }

        TickOutcome {
            frame: Some(frame),
            loop_completed,
            finished: false,
        }
    }

    fn tick_vertical(&mut self) -> TickOutcome {
        let Some(layout) = self.layout.as_ref() else {
            return TickOutcome::idle();
        };
        let hold_ticks = self.config.line_hold_ticks();
        let Some(step) = self.vertical.advance(layout, self.config.vertical_step, hold_ticks) else {
            return TickOutcome::idle();
        };

        let frame = self.frame(&layout.lines[step.line], 0.0, step.y);
        let mut loop_completed = None;
        if step.loop_completed {
            self.loop_count = self.loop_count.saturating_add(1);
            loop_completed = Some(self.loop_count);
        }

        TickOutcome {
            frame: Some(frame),
            loop_completed,
            finished: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::CellMeasurer;

    fn engine(text: &str) -> ScrollEngine {
        ScrollEngine::new(ScrollTextConfig {
            text: text.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    fn tick(engine: &mut ScrollEngine, width: f32) -> TickOutcome {
        engine.tick(Viewport::new(width, 1.0), &CellMeasurer)
    }

    #[test]
    fn test_offset_sequence_wraps_at_threshold() {
        // speed 3, view 100, text 50 -> threshold 150
        let mut engine = engine(&"x".repeat(50));
        let mut offsets = vec![engine.offset()];
        for _ in 0..50 {
            tick(&mut engine, 100.0);
            offsets.push(engine.offset());
        }

        let expected: Vec<f32> = (0..50).map(|k| (k * 3) as f32).chain([0.0]).collect();
        assert_eq!(offsets, expected);
        assert_eq!(engine.loop_count(), 1);
    }

    #[test]
    fn test_offset_is_ticks_times_speed_modulo_threshold() {
        for speed in [1u32, 3, 7, 30] {
            let mut engine = engine("hello world");
            engine.set_speed(speed).unwrap();
            // threshold = 40 + 11
            let threshold = 51.0f32;
            for k in 1..=200u32 {
                tick(&mut engine, 40.0);
                let expected = ((k * speed) as f32) % threshold;
                assert_eq!(engine.offset(), expected, "speed {} tick {}", speed, k);
                assert!(engine.offset() >= 0.0 && engine.offset() <= threshold);
            }
        }
    }

    #[test]
    fn test_frame_starts_at_right_edge() {
        let mut engine = engine("abc");
        let outcome = tick(&mut engine, 20.0);
        let frame = outcome.frame.unwrap();
        assert_eq!(frame.x, 20.0);
        assert_eq!(frame.y, 0.0);
        assert_eq!(frame.text, "abc");

        let frame = tick(&mut engine, 20.0).frame.unwrap();
        assert_eq!(frame.x, 17.0);
    }

    #[test]
    fn test_loop_count_increments_once_per_wrap() {
        // threshold 10 + 2 = 12, speed 3 -> one wrap every 4 ticks
        let mut engine = engine("ab");
        let mut completions = Vec::new();
        for _ in 0..12 {
            if let Some(count) = tick(&mut engine, 10.0).loop_completed {
                completions.push(count);
            }
        }
        assert_eq!(completions, vec![1, 2, 3]);
        assert_eq!(engine.loop_count(), 3);
    }

    #[test]
    fn test_finishes_once_after_loop_limit() {
        let mut engine = engine("ab");
        engine.set_loop_count(2).unwrap();

        let mut finished = 0;
        let mut last_loop = 0;
        for _ in 0..40 {
            let outcome = tick(&mut engine, 10.0);
            if let Some(count) = outcome.loop_completed {
                last_loop = count;
            }
            if outcome.finished {
                finished += 1;
                assert_eq!(last_loop, 2);
            }
        }

        assert_eq!(finished, 1);
        assert!(engine.is_stopped());
        assert_eq!(engine.loop_count(), 2);
    }

    #[test]
    fn test_scroll_forever_ignores_loop_limit() {
        let mut engine = engine("ab");
        engine.set_loop_count(1).unwrap();
        engine.set_scroll_forever(true);

        for _ in 0..20 {
            assert!(!tick(&mut engine, 10.0).finished);
        }
        assert!(engine.loop_count() > 1);
    }

    #[test]
    fn test_invalid_loop_count_rejected() {
        let mut engine = engine("ab");
        assert!(matches!(engine.set_loop_count(0), Err(Error::InvalidLoopCount(0))));
        assert!(matches!(engine.set_loop_count(-3), Err(Error::InvalidLoopCount(-3))));
        assert!(engine.config().scroll_forever);
    }

    #[test]
    fn test_invalid_speed_rejected() {
        let mut engine = engine("ab");
        assert!(engine.set_speed(0).is_err());
        assert!(engine.set_speed(31).is_err());
        assert_eq!(engine.config().speed, 3);
    }

    #[test]
    fn test_set_text_resets_offset_and_stop() {
        let mut engine = engine("ab");
        engine.set_loop_count(1).unwrap();
        for _ in 0..10 {
            tick(&mut engine, 10.0);
        }
        assert!(engine.is_stopped());

        engine.set_text("new text");
        assert_eq!(engine.offset(), 0.0);
        assert_eq!(engine.loop_count(), 0);
        assert!(!engine.is_stopped());
        assert!(tick(&mut engine, 10.0).frame.is_some());
    }

    #[test]
    fn test_pause_skips_without_advancing() {
        let mut engine = engine("ab");
        tick(&mut engine, 10.0);
        engine.set_paused(true);

        let outcome = tick(&mut engine, 10.0);
        assert!(outcome.frame.is_none());
        assert_eq!(engine.offset(), 3.0);

        engine.set_paused(false);
        tick(&mut engine, 10.0);
        assert_eq!(engine.offset(), 6.0);
    }

    #[test]
    fn test_click_requires_click_enable() {
        let mut engine = engine("ab");
        assert!(!engine.click());
        assert!(!engine.is_paused());

        engine.set_click_enable(true);
        assert!(engine.click());
        assert!(engine.is_paused());
        assert!(engine.click());
        assert!(!engine.is_paused());
    }

    #[test]
    fn test_empty_text_is_idle() {
        let mut engine = engine("");
        for _ in 0..5 {
            assert_eq!(tick(&mut engine, 10.0), TickOutcome::default());
        }
        assert_eq!(engine.offset(), 0.0);
    }

    #[test]
    fn test_timer_finishes_and_cancels_loop_limit() {
        let mut engine = engine("ab");
        engine.set_loop_count(100).unwrap();
        let generation = engine.set_duration(Duration::from_secs(5)).unwrap();
        assert_eq!(engine.config().loop_count, None);

        assert!(engine.finish_by_timer(generation));
        assert!(engine.is_stopped());
        // fires once
        assert!(!engine.finish_by_timer(generation));
        assert!(tick(&mut engine, 10.0).frame.is_none());
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let mut engine = engine("ab");
        let first = engine.set_duration(Duration::from_secs(5)).unwrap();
        let second = engine.set_duration(Duration::from_secs(8)).unwrap();

        assert!(!engine.finish_by_timer(first));
        assert!(!engine.is_stopped());
        assert!(engine.finish_by_timer(second));

        let third = engine.set_duration(Duration::from_secs(1)).unwrap();
        engine.set_loop_count(3).unwrap();
        assert!(!engine.finish_by_timer(third));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let mut engine = engine("ab");
        assert!(matches!(engine.set_duration(Duration::ZERO), Err(Error::InvalidDuration)));
    }

    #[test]
    fn test_resize_keeps_offset_in_range() {
        let mut engine = engine(&"x".repeat(10));
        for _ in 0..20 {
            tick(&mut engine, 100.0);
        }
        assert_eq!(engine.offset(), 60.0);

        // threshold shrinks to 5 + 10
        tick(&mut engine, 5.0);
        assert!(engine.offset() < 15.0);
    }

    #[test]
    fn test_vertical_mode_loops_through_lines() {
        let mut engine = ScrollEngine::new(ScrollTextConfig {
            text: "abcdef".into(),
            orientation: Orientation::Vertical,
            line_hold_ms: 0,
            ..Default::default()
        })
        .unwrap();

        // view 3x1: lines "abc", "def"; each line takes two ticks
        let viewport = Viewport::new(3.0, 1.0);
        let mut texts = Vec::new();
        let mut loops = Vec::new();
        for _ in 0..4 {
            let outcome = engine.tick(viewport, &CellMeasurer);
            texts.push(outcome.frame.unwrap().text);
            loops.extend(outcome.loop_completed);
        }

        assert_eq!(texts, vec!["abc", "abc", "def", "def"]);
        assert_eq!(loops, vec![1]);
        assert_eq!(engine.offset(), 0.0);
    }

    #[test]
    fn test_vertical_loop_limit_finishes_once_after_last_line() {
        let mut engine = ScrollEngine::new(ScrollTextConfig {
            text: "ab".into(),
            orientation: Orientation::Vertical,
            line_hold_ms: 0,
            ..Default::default()
        })
        .unwrap();
        engine.set_loop_count(1).unwrap();

        // view 10x3, center at 1: the line is drawn at 3, 2, 1, 0 and leaves
        let viewport = Viewport::new(10.0, 3.0);
        let outcomes: Vec<TickOutcome> = (0..4).map(|_| engine.tick(viewport, &CellMeasurer)).collect();

        let ys: Vec<f32> = outcomes.iter().map(|o| o.frame.as_ref().unwrap().y).collect();
        assert_eq!(ys, vec![3.0, 2.0, 1.0, 0.0]);
        let finished: Vec<bool> = outcomes.iter().map(|o| o.finished).collect();
        assert_eq!(finished, vec![false, false, false, true]);
        assert_eq!(outcomes[3].loop_completed, Some(1));
        assert!(engine.is_stopped());

        for _ in 0..10 {
            assert_eq!(engine.tick(viewport, &CellMeasurer), TickOutcome::default());
        }
    }
}
