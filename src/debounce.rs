//! Trailing-edge debounce.
//!
//! [`Debouncer`] holds at most one pending request. Scheduling replaces the
//! pending request and restarts the quiet period, so a burst of requests
//! fires once, `quiet` after the last one. Time is passed in by the caller
//! as a monotonic offset from any fixed epoch; nothing here reads a clock.
//!
//! ```
//! use core::time::Duration;
//! use justgrid::Debouncer;
//!
//! let ms = Duration::from_millis;
//! let mut d = Debouncer::new(ms(200));
//! d.schedule("a", ms(0));
//! d.schedule("b", ms(150));
//! assert_eq!(d.poll(ms(300)), None);
//! assert_eq!(d.poll(ms(350)), Some("b"));
//! assert_eq!(d.poll(ms(900)), None);
//! ```

use core::time::Duration;

/// Quiet period used by [`Debouncer::default`].
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(200);

/// Coalesces bursts of requests into one, delivered after a quiet period.
#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    /// `(payload, deadline)`
    pending: Option<(T, Duration)>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl<T> Debouncer<T> {
    pub const fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Schedule `payload` to fire `quiet` after `now`, replacing any pending
    /// request.
    pub fn schedule(&mut self, payload: T, now: Duration) {
        let deadline = now.saturating_add(self.quiet);
        self.pending = Some((payload, deadline));
    }

    /// Take the pending payload if its deadline has passed.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        if self.deadline().is_some_and(|deadline| now >= deadline) {
            self.cancel()
        } else {
            None
        }
    }

    /// Drop the pending request, returning its payload.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(p, _)| p)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending request will fire.
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|(_, d)| *d)
    }
}

/// Monotonic timestamps for driving a [`Debouncer`] from real time.
#[cfg(feature = "std")]
#[derive(Copy, Clone, Debug)]
pub struct MonotonicClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }

    /// Time elapsed since this clock was created.
    pub fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}
