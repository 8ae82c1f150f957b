//! Guard rails for navigator configuration.

use thiserror::Error;

use crate::models::NavigatorConfig;

/// A configuration value (or combination of values) the controller refuses
/// to run with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigGuardRailError {
    #[error("{field} must be a finite positive number, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },

    #[error(
        "viewport ratios must satisfy 0 < exit_ratio ({exit}) <= enter_ratio ({enter}) <= 1"
    )]
    RatioOrder { enter: f32, exit: f32 },

    #[error(
        "viewport.settle_delay_ms ({settle_ms}) exceeds lock.timeout_ms ({timeout_ms})"
    )]
    SettleExceedsTimeout { settle_ms: u64, timeout_ms: u64 },
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigGuardRailError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigGuardRailError::NotPositive { field, value })
    }
}

fn non_zero(field: &'static str, value: u64) -> Result<(), ConfigGuardRailError> {
    if value == 0 {
        Err(ConfigGuardRailError::ZeroDuration { field })
    } else {
        Ok(())
    }
}

impl NavigatorConfig {
    /// Check the configuration for values that would wedge or invert the
    /// controller. The first violation found is returned.
    pub fn validate(&self) -> Result<(), ConfigGuardRailError> {
        let g = &self.gesture;
        positive("gesture.wheel_threshold", g.wheel_threshold)?;
        positive("gesture.touch_min_distance_px", g.touch_min_distance_px)?;
        positive(
            "gesture.touch_min_velocity_px_per_ms",
            g.touch_min_velocity_px_per_ms,
        )?;
        positive("gesture.axis_lock_slop_px", g.axis_lock_slop_px)?;
        non_zero("gesture.touch_max_duration_ms", g.touch_max_duration_ms)?;

        non_zero("lock.timeout_ms", self.lock.timeout_ms)?;
        positive("carousel.step_px", self.carousel.step_px)?;
        non_zero("rate_limit.wheel_debounce_ms", self.rate_limit.wheel_debounce_ms)?;
        non_zero(
            "rate_limit.touch_move_throttle_ms",
            self.rate_limit.touch_move_throttle_ms,
        )?;

        let v = &self.viewport;
        let ordered = v.exit_ratio > 0.0
            && v.exit_ratio <= v.enter_ratio
            && v.enter_ratio <= 1.0;
        if !ordered {
            return Err(ConfigGuardRailError::RatioOrder {
                enter: v.enter_ratio,
                exit: v.exit_ratio,
            });
        }

        if v.settle_delay_ms > self.lock.timeout_ms {
            return Err(ConfigGuardRailError::SettleExceedsTimeout {
                settle_ms: v.settle_delay_ms,
                timeout_ms: self.lock.timeout_ms,
            });
        }

        Ok(())
    }
}
