//! Rate limiting policies for raw input
//!
//! `Debouncer` coalesces a burst into its last value once a quiet window
//! has elapsed (wheel notches). `Throttle` lets work through at most once
//! per interval (touch-move arbitration). Both are driven by explicit
//! instants so the controller can evaluate them from `tick`.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Replace the pending value and re-arm the quiet window.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.window));
    }

    /// Yield the pending value once its quiet window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending value without yielding it.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last_fired: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fired: None,
        }
    }

    /// Returns true (and starts a new interval) if the previous interval
    /// has elapsed.
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        let ready = match self.last_fired {
            Some(t) => now.saturating_duration_since(t) >= self.interval,
            None => true,
        };
        if ready {
            self.last_fired = Some(now);
        }
        ready
    }

    pub fn reset(&mut self) {
        self.last_fired = None;
    }

    /// Start a fresh interval at `now`, as if work had just been done.
    pub fn restart(&mut self, now: Instant) {
        self.last_fired = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn debouncer_yields_last_value_after_quiet_period() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(50 * MS);

        d.push(10.0_f32, t0);
        d.push(80.0, t0 + 20 * MS);
        d.push(120.0, t0 + 40 * MS);

        assert_eq!(d.poll(t0 + 60 * MS), None);
        assert_eq!(d.deadline(), Some(t0 + 90 * MS));
        assert_eq!(d.poll(t0 + 90 * MS), Some(120.0));
        assert_eq!(d.poll(t0 + 200 * MS), None);
    }

    #[test]
    fn debouncer_cancel_drops_pending() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(50 * MS);
        d.push(1, t0);

        assert!(d.cancel());
        assert!(!d.is_pending());
        assert_eq!(d.poll(t0 + 100 * MS), None);
    }

    #[test]
    fn throttle_passes_once_per_interval() {
        let t0 = Instant::now();
        let mut t = Throttle::new(16 * MS);

        assert!(t.try_acquire(t0));
        assert!(!t.try_acquire(t0 + 5 * MS));
        assert!(!t.try_acquire(t0 + 15 * MS));
        assert!(t.try_acquire(t0 + 16 * MS));

        t.reset();
        assert!(t.try_acquire(t0 + 17 * MS));
    }

    #[test]
    fn restarted_throttle_waits_a_full_interval() {
        let t0 = Instant::now();
        let mut t = Throttle::new(16 * MS);

        t.restart(t0);

        assert!(!t.try_acquire(t0 + 15 * MS));
        assert!(t.try_acquire(t0 + 16 * MS));
    }
}
