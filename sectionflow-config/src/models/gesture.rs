use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Thresholds that turn raw wheel and touch input into navigation intents.
///
/// Wheel threshold rejects trackpad jitter; the three touch limits must all
/// hold for a completed touch to count as a swipe, which is what separates
/// an intentional flick from a tap or a slow pan.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Minimum |deltaY| of a (debounced) wheel event before it becomes an
    /// intent. Observed values in the wild sit between 20 and 50.
    pub wheel_threshold: f32,
    /// Minimum vertical travel (px) of a completed touch.
    pub touch_min_distance_px: f32,
    /// Minimum average velocity (px/ms) of a completed touch.
    pub touch_min_velocity_px_per_ms: f32,
    /// Maximum duration (ms) of a completed touch.
    pub touch_max_duration_ms: u64,
    /// Displacement (px) a touch must travel before the arbiter decides
    /// whether it belongs to the page or to the nested carousel.
    pub axis_lock_slop_px: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            wheel_threshold: 30.0,
            touch_min_distance_px: 50.0,
            touch_min_velocity_px_per_ms: 0.2,
            touch_max_duration_ms: 500,
            axis_lock_slop_px: 6.0,
        }
    }
}

impl GestureConfig {
    pub fn touch_max_duration(&self) -> Duration {
        Duration::from_millis(self.touch_max_duration_ms)
    }
}

/// Rate limiting applied before classification.
///
/// Wheel input is debounced (a burst collapses into its last event after a
/// quiet period); touch-move arbitration is throttled to roughly one pass
/// per rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub wheel_debounce_ms: u64,
    pub touch_move_throttle_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            wheel_debounce_ms: 50,
            // ~60 Hz
            touch_move_throttle_ms: 16,
        }
    }
}

impl RateLimitConfig {
    pub fn wheel_debounce(&self) -> Duration {
        Duration::from_millis(self.wheel_debounce_ms)
    }

    pub fn touch_move_throttle(&self) -> Duration {
        Duration::from_millis(self.touch_move_throttle_ms)
    }
}
