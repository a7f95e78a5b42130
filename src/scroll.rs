//! Frame-clock driven scroll state.
//!
//! A [`ScrollSession`] owns everything that changes while a marquee runs: which
//! text is showing, how far it has travelled, and whether the clock should be
//! feeding it ticks. It never touches a timer itself; hosts call
//! [`ScrollSession::on_tick`] with a monotonic elapsed time and schedule the
//! inter-cycle pause returned in [`TickOutcome::CycleCompleted`].

mod cycle;

use std::time::Duration;

pub use cycle::PendingResume;

use crate::error::ConfigError;
use crate::text::{TextDirection, TextMetrics, TextSize, TextStyle};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPhase {
    /// Not started, or torn down.
    Uninitialized,
    /// Measured and waiting for the first render pass.
    PreStart,
    /// Clock running, offset accumulating.
    Scrolling,
    /// Waiting out the pause between two texts.
    Paused,
}

/// Result of feeding one clock tick to a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// The tick was ignored.
    Idle,
    /// The offset moved by the given number of pixels (possibly zero).
    Moved(f64),
    /// The current text left the viewport; the next one is shown and the
    /// clock must stay stopped until the ticket is resumed.
    CycleCompleted(PendingResume),
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<'a> {
    pub text: &'a str,
    pub style: &'a TextStyle,
    pub scroll_offset: f64,
    pub container_width: f64,
    pub text_size: TextSize,
    pub direction: TextDirection,
}

#[derive(Debug, Clone)]
pub struct ScrollSession {
    texts: Vec<String>,
    style: TextStyle,
    direction: TextDirection,
    scroll_speed: f64,
    pause: Duration,
    current_index: Option<usize>,
    scroll_offset: f64,
    text_size: TextSize,
    container_width: f64,
    phase: ScrollPhase,
    last_tick: Option<Duration>,
    generation: u64,
}

impl ScrollSession {
    /// Fails when `scroll_speed` is not a positive, finite number of pixels
    /// per second; such a session would never finish a cycle.
    pub fn new(scroll_speed: f64, pause: Duration) -> Result<Self, ConfigError> {
        if !scroll_speed.is_finite() || scroll_speed <= 0.0 {
            return Err(ConfigError::InvalidSpeed(scroll_speed));
        }
        Ok(Self {
            texts: Vec::new(),
            style: TextStyle::default(),
            direction: TextDirection::default(),
            scroll_speed,
            pause,
            current_index: None,
            scroll_offset: 0.0,
            text_size: TextSize::default(),
            container_width: 0.0,
            phase: ScrollPhase::Uninitialized,
            last_tick: None,
            generation: 0,
        })
    }

    /// Begins (or restarts) the cycle at the first text.
    ///
    /// Returns `false` and stays idle when `texts` is empty. Any pause ticket
    /// issued before this call becomes stale.
    pub fn start<M>(
        &mut self,
        texts: Vec<String>,
        style: TextStyle,
        direction: TextDirection,
        metrics: &M,
    ) -> bool
    where
        M: TextMetrics + ?Sized,
    {
        self.generation = self.generation.wrapping_add(1);
        self.texts = texts;
        self.style = style;
        self.direction = direction;
        self.scroll_offset = 0.0;
        self.last_tick = None;

        if self.texts.is_empty() {
            self.current_index = None;
            self.text_size = TextSize::default();
            self.phase = ScrollPhase::Uninitialized;
            tracing::debug!("no texts to scroll, staying idle");
            return false;
        }

        self.current_index = Some(0);
        self.measure_current(metrics);
        self.phase = ScrollPhase::PreStart;
        tracing::info!(count = self.texts.len(), "scroll session started");
        true
    }

    /// Marks that a render pass has observed the measured first text.
    ///
    /// Motion only begins after this, so the first visible frame is always
    /// `texts[0]` at offset zero. Returns `true` when the session switched to
    /// scrolling.
    pub fn on_render_pass(&mut self) -> bool {
        if self.phase != ScrollPhase::PreStart {
            return false;
        }
        self.phase = ScrollPhase::Scrolling;
        self.last_tick = None;
        tracing::debug!("first render observed, scrolling");
        true
    }

    /// Advances the offset by `scroll_speed * (elapsed - last_tick)`.
    ///
    /// The first tick after any (re)start contributes nothing, as does a tick
    /// whose timestamp does not exceed the previous one.
    pub fn on_tick<M>(&mut self, elapsed: Duration, metrics: &M) -> TickOutcome
    where
        M: TextMetrics + ?Sized,
    {
        if self.phase != ScrollPhase::Scrolling || self.texts.is_empty() {
            return TickOutcome::Idle;
        }

        let delta = match self.last_tick {
            Some(last) => elapsed.saturating_sub(last),
            None => Duration::ZERO,
        };
        self.last_tick = Some(self.last_tick.map_or(elapsed, |last| last.max(elapsed)));

        let distance = self.scroll_speed * delta.as_secs_f64();
        self.scroll_offset += distance;
        tracing::trace!(offset = self.scroll_offset, distance, "tick");

        if self.scroll_offset >= self.traversal_distance() {
            return TickOutcome::CycleCompleted(self.complete_cycle(metrics));
        }
        TickOutcome::Moved(distance)
    }

    /// Takes effect on the next render without touching scroll progress.
    pub fn set_container_width(&mut self, width: f64) {
        self.container_width = if width.is_finite() { width.max(0.0) } else { 0.0 };
    }

    /// Stops the session for good; pending pause tickets become no-ops.
    pub fn teardown(&mut self) {
        if self.phase != ScrollPhase::Uninitialized {
            tracing::info!("scroll session torn down");
        }
        self.generation = self.generation.wrapping_add(1);
        self.phase = ScrollPhase::Uninitialized;
        self.texts.clear();
        self.current_index = None;
        self.scroll_offset = 0.0;
        self.last_tick = None;
        self.text_size = TextSize::default();
    }

    /// Distance a text covers from fully hidden on one edge to fully hidden
    /// on the other.
    pub fn traversal_distance(&self) -> f64 {
        self.text_size.width + self.container_width
    }

    pub fn frame(&self) -> Option<Frame<'_>> {
        let text = self.current_text()?;
        Some(Frame {
            text,
            style: &self.style,
            scroll_offset: self.scroll_offset,
            container_width: self.container_width,
            text_size: self.text_size,
            direction: self.direction,
        })
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    /// True while the frame clock should be delivering ticks.
    pub fn is_scrolling(&self) -> bool {
        self.phase == ScrollPhase::Scrolling
    }

    /// True before the first scroll and between cycles.
    pub fn is_paused(&self) -> bool {
        matches!(self.phase, ScrollPhase::PreStart | ScrollPhase::Paused)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current_text(&self) -> Option<&str> {
        self.current_index
            .and_then(|i| self.texts.get(i))
            .map(String::as_str)
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn direction(&self) -> TextDirection {
        self.direction
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn text_size(&self) -> TextSize {
        self.text_size
    }

    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    pub fn pause(&self) -> Duration {
        self.pause
    }

    fn measure_current<M>(&mut self, metrics: &M)
    where
        M: TextMetrics + ?Sized,
    {
        let size = match self.current_index.and_then(|i| self.texts.get(i)) {
            Some(text) => metrics.measure(text, &self.style, self.direction),
            None => TextSize::default(),
        };
        self.text_size = size;
    }
}
