use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What the transition lock does when an admitted intent cannot move
/// (previous at the first section, next at the last one).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryRelease {
    /// Take the lock and drop it in the same step; no effect is requested.
    #[default]
    Immediate,
    /// Hold the lock for the full timeout, as if a transition had started.
    AwaitTimeout,
}

/// Transition lock tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LockConfig {
    /// Upper bound (ms) on how long a transition may hold the lock when the
    /// viewport never confirms arrival. Smooth scroll-into-view has no
    /// completion callback, so this is the only recovery path.
    pub timeout_ms: u64,
    pub boundary_release: BoundaryRelease,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 700,
            boundary_release: BoundaryRelease::Immediate,
        }
    }
}

impl LockConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Viewport tracker tuning.
///
/// Two ratios give the tracker hysteresis: a section becomes current once
/// it is at least `enter_ratio` visible, and stays current until it drops
/// below `exit_ratio`. A single threshold flaps at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub enter_ratio: f32,
    pub exit_ratio: f32,
    /// Delay (ms) between detecting arrival and releasing the lock.
    pub settle_delay_ms: u64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            enter_ratio: 0.7,
            exit_ratio: 0.3,
            settle_delay_ms: 100,
        }
    }
}

impl ViewportConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}
