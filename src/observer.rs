//! Container width observation.
//!
//! [`WidthObserver`] owns the last reported container width. The host feeds
//! it window resize and transition-end events; a burst of events becomes a
//! single measurement once the events stop for the quiet period. The change
//! callback only runs when the measured width differs from the last one
//! reported, so downstream layout is not recomputed for nothing.
//!
//! The observer has no framework ties: the host decides how to measure
//! ([`WidthSource`]), how events arrive, and when to [`poll`](WidthObserver::poll).
//!
//! ```
//! use core::cell::Cell;
//! use core::time::Duration;
//! use justgrid::{ObserverEvent, WidthObserver};
//!
//! let ms = Duration::from_millis;
//! let width = Cell::new(800);
//! let mut seen = Vec::new();
//! let mut observer = WidthObserver::new(|| width.get(), |w| seen.push(w));
//!
//! observer.start();
//! width.set(640);
//! observer.handle_event(ObserverEvent::Resize, ms(0));
//! observer.handle_event(ObserverEvent::Resize, ms(120));
//! assert_eq!(observer.poll(ms(200)), None);
//! assert_eq!(observer.poll(ms(320)), Some(640));
//! observer.stop();
//! drop(observer);
//!
//! assert_eq!(seen, [800, 640]);
//! ```

use core::time::Duration;

use crate::debounce::Debouncer;

/// Reads the container's current rendered width in pixels.
pub trait WidthSource {
    fn measure(&self) -> u32;
}

impl<F: Fn() -> u32> WidthSource for F {
    fn measure(&self) -> u32 {
        self()
    }
}

/// Kind of event the observer subscribes to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Window-level resize.
    Resize,
    /// End of a CSS-style transition.
    TransitionEnd,
}

/// An event reported by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ObserverEvent {
    /// The window was resized.
    Resize,
    /// A transition finished on some element.
    TransitionEnd {
        /// Whether the transition's target contains the observed container.
        /// Transitions elsewhere in the page are ignored.
        contains_container: bool,
    },
}

impl ObserverEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Resize => EventKind::Resize,
            Self::TransitionEnd { .. } => EventKind::TransitionEnd,
        }
    }
}

/// Active event subscriptions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct Listeners {
    resize: bool,
    transition_end: bool,
}

impl Listeners {
    const ALL: Self = Self {
        resize: true,
        transition_end: true,
    };
    const NONE: Self = Self {
        resize: false,
        transition_end: false,
    };

    fn contains(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::Resize => self.resize,
            EventKind::TransitionEnd => self.transition_end,
        }
    }
}

/// Debounced container width observer with a change callback.
pub struct WidthObserver<S, F> {
    source: S,
    on_change: F,
    debounce: Debouncer<()>,
    listeners: Listeners,
    reported: Option<u32>,
}

impl<S, F> WidthObserver<S, F> {
    /// Whether a subscription of `kind` is active.
    pub fn is_listening(&self, kind: EventKind) -> bool {
        self.listeners.contains(kind)
    }

    /// Whether the observer is between [`start`](Self::start) and
    /// [`stop`](Self::stop).
    pub fn is_running(&self) -> bool {
        self.listeners != Listeners::NONE
    }

    /// Last reported width, or 0 before the first measurement.
    pub fn current_width(&self) -> u32 {
        self.reported.unwrap_or(0)
    }

    /// When the pending refresh becomes due, if one is scheduled.
    pub fn pending_deadline(&self) -> Option<Duration> {
        self.debounce.deadline()
    }

    /// Cancel the pending refresh and release both subscriptions.
    ///
    /// No callback runs after this until the next [`start`](Self::start).
    pub fn stop(&mut self) {
        if self.debounce.cancel().is_some() {
            log::debug!("width observer stopped with a refresh pending");
        }
        self.listeners = Listeners::NONE;
    }
}

impl<S: WidthSource, F: FnMut(u32)> WidthObserver<S, F> {
    /// Create a stopped observer with the default quiet period.
    pub fn new(source: S, on_change: F) -> Self {
        Self {
            source,
            on_change,
            debounce: Debouncer::default(),
            listeners: Listeners::NONE,
            reported: None,
        }
    }

    /// Replace the quiet period. Any pending refresh is dropped.
    pub fn with_quiet_period(mut self, quiet: Duration) -> Self {
        self.debounce = Debouncer::new(quiet);
        self
    }

    /// Subscribe to resize and transition-end events, then measure
    /// immediately and report the initial width.
    pub fn start(&mut self) -> u32 {
        self.listeners = Listeners::ALL;
        log::debug!("width observer started");
        self.refresh();
        self.current_width()
    }

    /// Feed one host event. Returns whether a refresh was scheduled.
    ///
    /// `now` is a monotonic timestamp from the same clock later passed to
    /// [`poll`](Self::poll).
    pub fn handle_event(&mut self, event: ObserverEvent, now: Duration) -> bool {
        if !self.is_listening(event.kind()) {
            return false;
        }
        if let ObserverEvent::TransitionEnd {
            contains_container: false,
        } = event
        {
            return false;
        }
        self.debounce.schedule((), now);
        true
    }

    /// Run the pending refresh if its quiet period has elapsed.
    ///
    /// Returns the new width when it changed.
    pub fn poll(&mut self, now: Duration) -> Option<u32> {
        self.debounce.poll(now)?;
        self.refresh()
    }

    /// Measure now, bypassing the debounce.
    ///
    /// Returns the new width when it changed. A stopped observer does not
    /// measure and returns `None`.
    pub fn refresh(&mut self) -> Option<u32> {
        if !self.is_running() {
            return None;
        }
        let width = self.source.measure();
        if self.reported == Some(width) {
            log::trace!("container width unchanged at {width}");
            return None;
        }
        log::debug!(
            "container width {} -> {width}",
            self.reported.map_or(-1, i64::from)
        );
        self.reported = Some(width);
        (self.on_change)(width);
        Some(width)
    }
}

impl<S, F> core::fmt::Debug for WidthObserver<S, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WidthObserver")
            .field("debounce", &self.debounce)
            .field("listeners", &self.listeners)
            .field("reported", &self.reported)
            .finish_non_exhaustive()
    }
}
