//! "User stopped typing" detection.

use std::time::Duration;

use horizon_suggest_core::{Scheduler, TimerId};

/// Default pause after the last keystroke before typing counts as stopped.
pub const DEFAULT_TYPING_STOPPED_DELAY: Duration = Duration::from_millis(800);

/// Coalesces a burst of keystrokes into one notification.
///
/// Each keystroke cancels the pending timer and starts a new one, so at most
/// one timer is ever outstanding. The owner routes expired timer ids back
/// through [`handle_timer`](Self::handle_timer).
#[derive(Debug)]
pub struct DebounceTimer {
    delay: Duration,
    pending: Option<TimerId>,
}

impl DebounceTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Change the delay. Takes effect from the next keystroke.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Whether a "stopped typing" timer is outstanding.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Restart the countdown.
    pub fn on_keystroke(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(previous) = self.pending.take() {
            scheduler.cancel(previous);
        }
        self.pending = Some(scheduler.start_one_shot(self.delay));
    }

    /// Consume an expired timer. Returns `true` if it was ours, meaning the
    /// user has stopped typing.
    pub fn handle_timer(&mut self, id: TimerId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Cancel any outstanding timer. Safe to call repeatedly.
    pub fn on_destroy(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(pending) = self.pending.take() {
            scheduler.cancel(pending);
        }
    }
}

impl Default for DebounceTimer {
    fn default() -> Self {
        Self::new(DEFAULT_TYPING_STOPPED_DELAY)
    }
}
