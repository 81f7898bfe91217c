//! Settle timer guarding the board while a committed move is on display.
//!
//! The core engine computes moves instantly. The timer gives the player a moment to see which
//! tiles were merged or spawned, and move input is dropped until it has run out.

use std::time::{Duration, Instant};

/// Time in milliseconds a committed move stays highlighted.
///
/// Move input arriving during this window is ignored, so keeping the key held down does not skip
/// over intermediate boards.
pub(crate) const SETTLE_DELAY_MS: u64 = 120;

/// Tracks whether the last committed move is still settling.
#[derive(Debug, Default)]
pub(crate) struct SettleTimer {
    /// Instant the current transition started, if one is running.
    started: Option<Instant>,
}

impl SettleTimer {
    /// Creates an idle timer.
    pub(crate) const fn new() -> Self {
        Self { started: None }
    }

    /// Starts a transition for a freshly committed move.
    pub(crate) fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Ends any running transition immediately.
    pub(crate) fn clear(&mut self) {
        self.started = None;
    }

    /// Returns whether a transition is still running.
    pub(crate) fn is_settling(&self) -> bool {
        self.started
            .is_some_and(|started| started.elapsed() < Duration::from_millis(SETTLE_DELAY_MS))
    }

    /// Drops the transition once its delay has passed.
    pub(crate) fn update(&mut self) {
        if !self.is_settling() {
            self.clear();
        }
    }
}
