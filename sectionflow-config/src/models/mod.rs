//! Configuration models for the navigation controller.

pub mod gesture;
pub mod timing;

use serde::{Deserialize, Serialize};

pub use gesture::{GestureConfig, RateLimitConfig};
pub use timing::{BoundaryRelease, LockConfig, ViewportConfig};

/// Top-level tunables for a sectionflow stage.
///
/// Every section is optional in a file; missing keys fall back to the
/// defaults below so a config only needs to name what it overrides.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Wheel, touch and axis-lock thresholds used by the gesture classifier.
    pub gesture: GestureConfig,
    /// Transition lock timeout and boundary behaviour.
    pub lock: LockConfig,
    /// Visibility ratios and settle delay for the viewport tracker.
    pub viewport: ViewportConfig,
    /// Nested carousel stepping.
    pub carousel: CarouselConfig,
    /// Debounce/throttle windows applied to raw input.
    pub rate_limit: RateLimitConfig,
    /// Motion preferences forwarded by the host.
    pub motion: MotionConfig,
}

/// Horizontal carousel settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Distance (px) a single arrow click scrolls the carousel by.
    pub step_px: f32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self { step_px: 220.0 }
    }
}

/// Motion preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Start with instantaneous jumps instead of animated transitions.
    /// Hosts usually flip this at runtime from `prefers-reduced-motion`.
    pub reduced_motion: bool,
}
