use std::time::{Duration, Instant};

use tracing::trace;

/// Coalesces container-resize bursts into at most one emission per window.
///
/// The first event after a quiet window fires immediately. Events inside a
/// window replace a single pending width, released by [`Self::poll`] once the
/// window has elapsed. Time is supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeThrottle {
    window: Duration,
    last_emit: Option<Instant>,
    pending_width_px: Option<f64>,
}

impl ResizeThrottle {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_emit: None,
            pending_width_px: None,
        }
    }

    #[must_use]
    pub fn from_millis(window_ms: u64) -> Self {
        Self::new(Duration::from_millis(window_ms))
    }

    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending_width_px.is_some()
    }

    /// Records a resize; returns the width to recompute with, if any.
    pub fn on_resize(&mut self, width_px: f64, now: Instant) -> Option<f64> {
        if !width_px.is_finite() || width_px < 0.0 {
            trace!(width_px, "ignoring invalid container width");
            return None;
        }

        if self.window_open(now) {
            self.pending_width_px = Some(width_px);
            return None;
        }

        self.emit(width_px, now)
    }

    /// Releases the pending width once the window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<f64> {
        if self.window_open(now) {
            return None;
        }
        let width_px = self.pending_width_px?;
        self.emit(width_px, now)
    }

    /// Earliest instant at which [`Self::poll`] can release the pending width.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending_width_px?;
        self.last_emit.map(|last| last + self.window)
    }

    fn window_open(&self, now: Instant) -> bool {
        self.last_emit
            .is_some_and(|last| now.saturating_duration_since(last) < self.window)
    }

    fn emit(&mut self, width_px: f64, now: Instant) -> Option<f64> {
        self.last_emit = Some(now);
        self.pending_width_px = None;
        Some(width_px)
    }
}
