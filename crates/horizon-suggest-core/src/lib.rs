//! Core systems for Horizon Suggest.
//!
//! This crate provides the event-loop plumbing the search field is built on:
//!
//! - **Signal/Slot System**: Single-threaded notifications with scoped
//!   subscriptions ([`Signal`], [`ConnectionGuard`])
//! - **Timers**: Cancellable one-shot timers driven by the host loop
//!   ([`TimerManager`], [`Scheduler`])
//! - **Logging**: `tracing` targets for filtering subsystem output
//!
//! # Timer Example
//!
//! ```
//! use std::time::Duration;
//! use horizon_suggest_core::{ManualClock, TimerManager};
//!
//! let clock = ManualClock::new();
//! let mut timers = TimerManager::with_clock(clock.clone());
//!
//! let id = timers.start_one_shot(Duration::from_millis(800));
//! clock.advance(Duration::from_millis(800));
//!
//! assert_eq!(timers.process_expired(), vec![id]);
//! ```

mod error;
pub mod logging;
pub mod signal;
mod timer;

pub use error::TimerError;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use timer::{Clock, ManualClock, Scheduler, SystemClock, TimerId, TimerManager};
