//! Hand-over from one finished text to the next.

use std::time::Duration;

use super::{ScrollPhase, ScrollSession};
use crate::text::TextMetrics;

/// Ticket for the deferred resume after an inter-cycle pause.
///
/// The host waits `duration` without blocking, then hands the ticket back to
/// [`ScrollSession::resume`]. Tickets outlive nothing: a restart or teardown
/// in the meantime makes them stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingResume {
    generation: u64,
    duration: Duration,
}

impl PendingResume {
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl ScrollSession {
    /// Runs once per finished scroll: halt, reset, advance, remeasure.
    ///
    /// The new text is measured before this returns, so the next render and
    /// the next completion check already see its width.
    pub(super) fn complete_cycle<M>(&mut self, metrics: &M) -> PendingResume
    where
        M: TextMetrics + ?Sized,
    {
        self.phase = ScrollPhase::Paused;
        self.scroll_offset = 0.0;
        self.last_tick = None;

        let next = self
            .current_index
            .map_or(0, |i| (i + 1) % self.texts.len());
        self.current_index = Some(next);
        self.measure_current(metrics);

        tracing::debug!(
            index = next,
            width = self.text_size.width,
            pause_ms = self.pause.as_millis() as u64,
            "cycle completed, pausing"
        );

        PendingResume {
            generation: self.generation,
            duration: self.pause,
        }
    }

    /// Ends the pause described by `ticket` and restarts motion.
    ///
    /// Returns `false` without touching any state if the session was torn
    /// down or restarted after the ticket was issued.
    pub fn resume(&mut self, ticket: PendingResume) -> bool {
        if ticket.generation != self.generation || self.phase != ScrollPhase::Paused {
            tracing::trace!("ignoring stale resume");
            return false;
        }
        self.phase = ScrollPhase::Scrolling;
        self.last_tick = None;
        tracing::debug!(index = ?self.current_index, "pause over, scrolling");
        true
    }
}
