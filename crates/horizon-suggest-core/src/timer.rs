//! Timer system for Horizon Suggest.
//!
//! Provides cancellable one-shot timers driven by the host event loop. The
//! host asks [`TimerManager::time_until_next`] how long it may sleep, then
//! calls [`TimerManager::process_expired`] and routes each returned
//! [`TimerId`] to whichever component scheduled it.
//!
//! Components never talk to a concrete manager; they go through the
//! [`Scheduler`] trait so tests can drive time with a [`ManualClock`].

use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;
use std::time::{Duration, Instant};

use slotmap::{SlotMap, new_key_type};

use crate::error::TimerError;

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

// ============================================================================
// Clock
// ============================================================================

/// Source of "now" for a [`TimerManager`].
pub trait Clock {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle and give
/// another to the timer manager.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    /// Create a clock frozen at the current instant.
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

// ============================================================================
// Scheduler
// ============================================================================

/// The scheduling seam used by components that need delayed callbacks.
pub trait Scheduler {
    /// Start a one-shot timer that expires after `delay`.
    fn start_one_shot(&mut self, delay: Duration) -> TimerId;

    /// Cancel a timer. Returns `false` if it had already fired or been
    /// cancelled; never fails.
    fn cancel(&mut self, id: TimerId) -> bool;

    /// Whether `id` is still pending.
    fn is_pending(&self, id: TimerId) -> bool;
}

// ============================================================================
// Timer Manager
// ============================================================================

/// An entry in the timer queue (min-heap by fire time).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: Instant,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other.fire_time.cmp(&self.fire_time)
    }
}

/// Manages the pending one-shot timers of an event loop.
pub struct TimerManager<C: Clock = SystemClock> {
    clock: C,
    /// All pending timers. Deadlines live in the queue.
    timers: SlotMap<TimerId, ()>,
    /// Priority queue of pending timer fires (min-heap by fire time).
    queue: BinaryHeap<TimerQueueEntry>,
}

impl TimerManager<SystemClock> {
    /// Create a timer manager on the wall clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for TimerManager<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TimerManager<C> {
    /// Create a timer manager on the given clock.
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
        }
    }

    /// Access the clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Start a one-shot timer that fires after the specified duration.
    pub fn start_one_shot(&mut self, duration: Duration) -> TimerId {
        let id = self.timers.insert(());
        self.queue.push(TimerQueueEntry {
            id,
            fire_time: self.clock.now() + duration,
        });

        tracing::trace!(target: "horizon_suggest_core::timer", ?id, ?duration, "timer started");
        id
    }

    /// Stop and remove a timer.
    ///
    /// Returns an error if the timer already fired or was stopped.
    pub fn stop(&mut self, id: TimerId) -> Result<(), TimerError> {
        if self.timers.remove(id).is_some() {
            tracing::trace!(target: "horizon_suggest_core::timer", ?id, "timer stopped");
            Ok(())
        } else {
            Err(TimerError::InvalidTimerId)
        }
    }

    /// Check if a timer is still pending.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Get the duration until the next timer fires, if any.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        self.discard_stale_entries();
        let now = self.clock.now();
        self.queue
            .peek()
            .map(|entry| entry.fire_time.saturating_duration_since(now))
    }

    /// Remove and return every timer whose deadline has passed, earliest
    /// first.
    #[tracing::instrument(skip(self), target = "horizon_suggest_core::timer", level = "trace")]
    pub fn process_expired(&mut self) -> Vec<TimerId> {
        let now = self.clock.now();
        let mut fired = Vec::new();

        while let Some(entry) = self.queue.peek().copied() {
            if entry.fire_time > now {
                break;
            }
            self.queue.pop();

            // Cancelled timers leave their queue entry behind.
            if self.timers.remove(entry.id).is_none() {
                continue;
            }

            tracing::trace!(target: "horizon_suggest_core::timer", id = ?entry.id, "timer fired");
            fired.push(entry.id);
        }

        fired
    }

    /// Get the number of pending timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    fn discard_stale_entries(&mut self) {
        while let Some(entry) = self.queue.peek() {
            if self.timers.contains_key(entry.id) {
                break;
            }
            self.queue.pop();
        }
    }
}

impl<C: Clock> Scheduler for TimerManager<C> {
    fn start_one_shot(&mut self, delay: Duration) -> TimerId {
        TimerManager::start_one_shot(self, delay)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.stop(id).is_ok()
    }

    fn is_pending(&self, id: TimerId) -> bool {
        self.is_active(id)
    }
}

/// A timer manager shared between the host loop and the components that
/// schedule on it.
impl<S: Scheduler> Scheduler for Rc<RefCell<S>> {
    fn start_one_shot(&mut self, delay: Duration) -> TimerId {
        self.borrow_mut().start_one_shot(delay)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.borrow_mut().cancel(id)
    }

    fn is_pending(&self, id: TimerId) -> bool {
        self.borrow().is_pending(id)
    }
}
