//! The embeddable marquee: options, measurement, state and renderer in one.

use std::time::Duration;

use crate::config::MarqueeOptions;
use crate::error::ConfigError;
use crate::render::{self, DrawInstruction, FrameRenderer, RenderOutcome, Surface};
use crate::scroll::{PendingResume, ScrollPhase, ScrollSession, TickOutcome};
use crate::text::{TextDirection, TextMetrics, TextSize, TextStyle};

/// Host-facing marquee widget.
///
/// The host supplies the viewport through [`layout`](Self::layout), feeds
/// clock ticks while [`is_clock_running`](Self::is_clock_running) holds,
/// waits out any [`PendingResume`] it gets back, and pulls frames with
/// [`render`](Self::render).
pub struct Marquee<M> {
    options: MarqueeOptions,
    metrics: M,
    session: ScrollSession,
    renderer: FrameRenderer,
    viewport_height: Option<f64>,
    active: bool,
}

impl<M: TextMetrics> Marquee<M> {
    pub fn new(options: MarqueeOptions, metrics: M) -> Result<Self, ConfigError> {
        options.validate()?;
        let session = ScrollSession::new(options.scroll_speed, options.pause_duration())?;
        Ok(Self {
            options,
            metrics,
            session,
            renderer: FrameRenderer::new(),
            viewport_height: None,
            active: false,
        })
    }

    /// Starts cycling from the first text. Returns `false` if there is
    /// nothing to show.
    pub fn start(&mut self) -> bool {
        self.active = true;
        self.renderer.invalidate();
        self.session.start(
            self.options.texts.clone(),
            self.options.style.clone(),
            self.options.direction,
            &self.metrics,
        )
    }

    /// Tears the session down; outstanding pause tickets become no-ops.
    pub fn stop(&mut self) {
        self.active = false;
        self.session.teardown();
        self.renderer.invalidate();
    }

    /// Applies the viewport for this layout pass and returns the size the
    /// marquee wants: the full width and the measured text height.
    pub fn layout(&mut self, width: f64, height: Option<f64>) -> TextSize {
        self.session.set_container_width(width);
        self.viewport_height = height.filter(|h| h.is_finite() && *h >= 0.0);
        let size = self.session.text_size();
        TextSize::new(
            self.session.container_width(),
            self.viewport_height.unwrap_or(size.height),
        )
    }

    /// The current render request: issues at most one draw call.
    ///
    /// The first call after [`start`](Self::start) also releases the
    /// session into scrolling.
    pub fn render<S>(&mut self, surface: &mut S) -> RenderOutcome
    where
        S: Surface + ?Sized,
    {
        let instruction = self.draw_instruction();
        let outcome = self.renderer.render(instruction, surface);
        self.session.on_render_pass();
        outcome
    }

    /// What would be drawn right now. Has no side effects.
    pub fn draw_instruction(&self) -> Option<DrawInstruction> {
        self.session
            .frame()
            .map(|frame| render::draw_instruction(&frame, self.viewport_height))
    }

    pub fn tick(&mut self, elapsed: Duration) -> TickOutcome {
        self.session.on_tick(elapsed, &self.metrics)
    }

    pub fn resume(&mut self, ticket: PendingResume) -> bool {
        self.session.resume(ticket)
    }

    /// Replaces the texts and restarts from the first one.
    pub fn set_texts(&mut self, texts: Vec<String>) -> bool {
        tracing::debug!(count = texts.len(), "texts replaced, restarting");
        self.options.texts = texts;
        self.restart()
    }

    /// Changes the style and restarts from the first text.
    pub fn set_style(&mut self, style: TextStyle) -> bool {
        tracing::debug!("style changed, restarting");
        self.options.style = style;
        self.restart()
    }

    /// Changes the direction and restarts from the first text.
    pub fn set_direction(&mut self, direction: TextDirection) -> bool {
        tracing::debug!(?direction, "direction changed, restarting");
        self.options.direction = direction;
        self.restart()
    }

    pub fn is_clock_running(&self) -> bool {
        self.session.is_scrolling()
    }

    pub fn phase(&self) -> ScrollPhase {
        self.session.phase()
    }

    pub fn session(&self) -> &ScrollSession {
        &self.session
    }

    pub fn options(&self) -> &MarqueeOptions {
        &self.options
    }

    // A stopped marquee only records the new options.
    fn restart(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.start()
    }
}
