//! Time provider abstraction
//!
//! Every deadline in the controller (wheel debounce, settle delay, lock
//! timeout) is measured against a `TimeProvider` so tests can drive the
//! clock by hand instead of sleeping.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Source of the current instant.
pub trait TimeProvider: Send + Sync + 'static {
    /// Get the current instant
    fn now(&self) -> Instant;

    /// Clone the time provider into a boxed trait object
    fn clone_box(&self) -> Box<dyn TimeProvider>;
}

/// Production time provider that uses the monotonic system clock
#[derive(Clone, Debug, Default)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn clone_box(&self) -> Box<dyn TimeProvider> {
        Box::new(self.clone())
    }
}

/// Virtual time provider for replay and tests
///
/// Clones share the same clock, so a test can keep one handle and hand
/// another to the controller.
#[derive(Clone, Debug)]
pub struct VirtualTimeProvider {
    instant: Arc<Mutex<Instant>>,
    base_instant: Instant,
}

impl VirtualTimeProvider {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            instant: Arc::new(Mutex::new(now)),
            base_instant: now,
        }
    }

    /// Advance time by a duration
    pub fn advance(&self, duration: Duration) {
        let mut instant =
            self.instant.lock().unwrap_or_else(PoisonError::into_inner);
        *instant += duration;
    }

    /// Advance time by whole milliseconds
    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    /// Move the clock to `offset` past its starting point. Moving backwards
    /// is ignored; the clock is monotonic.
    pub fn set_elapsed(&self, offset: Duration) {
        let target = self.base_instant + offset;
        let mut instant =
            self.instant.lock().unwrap_or_else(PoisonError::into_inner);
        if target > *instant {
            *instant = target;
        }
    }

    /// Time elapsed since the provider was created
    pub fn elapsed(&self) -> Duration {
        self.now().saturating_duration_since(self.base_instant)
    }

    /// Reset to initial time
    pub fn reset(&self) {
        *self.instant.lock().unwrap_or_else(PoisonError::into_inner) =
            self.base_instant;
    }
}

impl Default for VirtualTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for VirtualTimeProvider {
    fn now(&self) -> Instant {
        *self.instant.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn clone_box(&self) -> Box<dyn TimeProvider> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_virtual_time_advance() {
        let provider = VirtualTimeProvider::new();
        let start = provider.now();

        provider.advance(Duration::from_secs(10));

        assert_eq!(provider.now() - start, Duration::from_secs(10));
    }

    #[test]
    fn test_clones_share_clock() {
        let provider = VirtualTimeProvider::new();
        let boxed = provider.clone_box();

        provider.advance_ms(250);

        assert_eq!(boxed.now(), provider.now());
        assert_eq!(provider.elapsed(), Duration::from_millis(250));
    }

    #[test]
    fn test_set_elapsed_is_monotonic() {
        let provider = VirtualTimeProvider::new();
        provider.set_elapsed(Duration::from_millis(500));
        provider.set_elapsed(Duration::from_millis(100));

        assert_eq!(provider.elapsed(), Duration::from_millis(500));

        provider.reset();
        assert_eq!(provider.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_system_time_provider() {
        let provider = SystemTimeProvider;
        let a = provider.now();
        std::thread::sleep(Duration::from_millis(5));

        assert!(provider.now() > a);
    }
}
