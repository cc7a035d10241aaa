//! Generation-token debouncing.
//!
//! The handler never sleeps. Instead, each new value replaces the pending one
//! and hands back a fresh [`TimerToken`]; the host schedules a timer for that
//! token and reports it back when it fires. Only the newest token releases the
//! pending value, so timers belonging to superseded values are inert.
//!
//! # Example
//!
//! ```
//! use provider_directory::app::debounce::{Debouncer, TimerLane};
//! use std::time::Duration;
//!
//! let mut debouncer = Debouncer::new(TimerLane::Filters, Duration::from_millis(400));
//! let first = debouncer.push("b");
//! let second = debouncer.push("bo");
//!
//! assert_eq!(debouncer.fire(first), None);
//! assert_eq!(debouncer.fire(second), Some("bo"));
//! ```

use std::fmt;
use std::time::Duration;

/// Shortest accepted debounce window.
pub const MIN_DEBOUNCE: Duration = Duration::from_millis(300);

/// Longest accepted debounce window.
pub const MAX_DEBOUNCE: Duration = Duration::from_millis(500);

/// Which debounced input a timer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerLane {
    /// Text filter edits.
    Filters,
    /// Search-box suggestion queries.
    Suggestions,
}

/// Identifies one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken {
    pub lane: TimerLane,
    pub generation: u64,
}

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}#{}", self.lane, self.generation)
    }
}

/// Holds the latest value until its quiet period ends.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    lane: TimerLane,
    delay: Duration,
    generation: u64,
    pending: Option<(TimerToken, T)>,
}

impl<T> Debouncer<T> {
    /// Creates a debouncer; the delay is clamped to [`MIN_DEBOUNCE`]..=[`MAX_DEBOUNCE`].
    #[must_use]
    pub fn new(lane: TimerLane, delay: Duration) -> Self {
        Self {
            lane,
            delay: delay.clamp(MIN_DEBOUNCE, MAX_DEBOUNCE),
            generation: 0,
            pending: None,
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces the pending value and returns the token of its timer.
    pub fn push(&mut self, value: T) -> TimerToken {
        self.generation += 1;
        let token = TimerToken {
            lane: self.lane,
            generation: self.generation,
        };
        self.pending = Some((token, value));
        token
    }

    /// Releases the pending value if `token` is the newest one.
    pub fn fire(&mut self, token: TimerToken) -> Option<T> {
        match &self.pending {
            Some((current, _)) if *current == token => self.pending.take().map(|(_, value)| value),
            _ => None,
        }
    }

    /// Drops the pending value; outstanding timers become inert.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// The value waiting for its timer, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|(_, value)| value)
    }

    /// Returns `true` if `token` belongs to this debouncer's pending value.
    #[must_use]
    pub fn owns(&self, token: TimerToken) -> bool {
        matches!(&self.pending, Some((current, _)) if *current == token)
    }
}
