//! Pure classification of raw input into navigation signals.

use sectionflow_config::GestureConfig;

use super::sample::GestureSample;
use super::types::{
    GestureSignal, InputSource, Key, NavigationIntent, TouchVerdict,
};

/// Stateless classifier. Holds only its thresholds and never touches
/// navigation state.
#[derive(Debug, Clone, Copy)]
pub struct GestureClassifier {
    cfg: GestureConfig,
}

impl GestureClassifier {
    pub fn new(cfg: GestureConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.cfg
    }

    /// Classify a (debounced) wheel delta. Deltas within the threshold are
    /// jitter and yield `None`.
    pub fn classify_wheel(&self, delta_y: f32) -> GestureSignal {
        let threshold = self.cfg.wheel_threshold;
        let intent = if delta_y > threshold {
            NavigationIntent::Next
        } else if delta_y < -threshold {
            NavigationIntent::Previous
        } else {
            return GestureSignal::none(InputSource::Wheel);
        };

        GestureSignal {
            intent,
            source: InputSource::Wheel,
            confidence: saturating_ratio(delta_y.abs(), threshold),
        }
    }

    pub fn classify_key(&self, key: &Key) -> GestureSignal {
        let intent = match key {
            Key::ArrowDown | Key::PageDown => NavigationIntent::Next,
            Key::ArrowUp | Key::PageUp => NavigationIntent::Previous,
            _ => return GestureSignal::none(InputSource::Key),
        };

        GestureSignal {
            intent,
            source: InputSource::Key,
            confidence: 1.0,
        }
    }

    /// Classify a completed touch. Distance, duration and velocity limits
    /// must all hold; otherwise the gesture was a tap or a slow pan.
    pub fn classify_touch(&self, sample: &GestureSample) -> TouchVerdict {
        let (dx, dy) = sample.displacement();
        if dx.abs() > dy.abs() {
            return TouchVerdict::Foreign;
        }

        let distance = dy.abs();
        let velocity = sample.vertical_velocity();
        let swipe = distance > self.cfg.touch_min_distance_px
            && sample.elapsed() < self.cfg.touch_max_duration()
            && velocity > self.cfg.touch_min_velocity_px_per_ms;

        if !swipe {
            tracing::trace!(
                distance,
                velocity,
                elapsed_ms = sample.elapsed().as_millis() as u64,
                "touch below swipe thresholds"
            );
            return TouchVerdict::Page(GestureSignal::none(InputSource::Touch));
        }

        let intent = if dy > 0.0 {
            NavigationIntent::Next
        } else {
            NavigationIntent::Previous
        };

        TouchVerdict::Page(GestureSignal {
            intent,
            source: InputSource::Touch,
            confidence: saturating_ratio(
                velocity,
                self.cfg.touch_min_velocity_px_per_ms,
            ),
        })
    }
}

/// Maps `value` in `[threshold, 2 * threshold]` onto `[0.5, 1.0]`.
fn saturating_ratio(value: f32, threshold: f32) -> f32 {
    (value / (2.0 * threshold)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::types::Point;
    use std::time::{Duration, Instant};

    fn classifier() -> GestureClassifier {
        GestureClassifier::new(GestureConfig::default())
    }

    fn swipe(dx: f32, dy: f32, ms: u64) -> GestureSample {
        let t0 = Instant::now();
        let origin = Point::new(200.0, 500.0);
        let mut sample = GestureSample::begin(origin, t0);
        // finger travels opposite to the content
        sample.update(
            Point::new(origin.x - dx, origin.y - dy),
            t0 + Duration::from_millis(ms),
        );
        sample
    }

    fn intent_of(verdict: TouchVerdict) -> Option<NavigationIntent> {
        match verdict {
            TouchVerdict::Page(signal) => Some(signal.intent),
            TouchVerdict::Foreign => None,
        }
    }

    #[test]
    fn wheel_threshold_rejects_jitter() {
        let c = classifier();

        assert_eq!(c.classify_wheel(120.0).intent, NavigationIntent::Next);
        assert_eq!(c.classify_wheel(-45.0).intent, NavigationIntent::Previous);
        assert_eq!(c.classify_wheel(30.0).intent, NavigationIntent::None);
        assert_eq!(c.classify_wheel(-12.0).confidence, 0.0);
        assert_eq!(c.classify_wheel(120.0).confidence, 1.0);
    }

    #[test]
    fn keys_map_to_directions() {
        let c = classifier();

        for (name, expected) in [
            ("ArrowDown", NavigationIntent::Next),
            ("PageDown", NavigationIntent::Next),
            ("ArrowUp", NavigationIntent::Previous),
            ("PageUp", NavigationIntent::Previous),
            ("Enter", NavigationIntent::None),
            ("Escape", NavigationIntent::None),
        ] {
            assert_eq!(
                c.classify_key(&Key::from_name(name)).intent,
                expected,
                "{name}"
            );
        }
    }

    #[test]
    fn quick_vertical_swipe_is_an_intent() {
        // 60 px in 200 ms = 0.3 px/ms
        let verdict = classifier().classify_touch(&swipe(0.0, 60.0, 200));
        assert_eq!(intent_of(verdict), Some(NavigationIntent::Next));

        let verdict = classifier().classify_touch(&swipe(0.0, -60.0, 200));
        assert_eq!(intent_of(verdict), Some(NavigationIntent::Previous));
    }

    #[test]
    fn short_swipe_is_none() {
        let verdict = classifier().classify_touch(&swipe(0.0, 10.0, 200));
        assert_eq!(intent_of(verdict), Some(NavigationIntent::None));
    }

    #[test]
    fn slow_swipe_is_none() {
        let verdict = classifier().classify_touch(&swipe(0.0, 60.0, 900));
        assert_eq!(intent_of(verdict), Some(NavigationIntent::None));
    }

    #[test]
    fn fast_but_within_duration_limit_and_too_slow_velocity_is_none() {
        // 55 px in 400 ms = 0.1375 px/ms, under the 0.2 floor
        let verdict = classifier().classify_touch(&swipe(0.0, 55.0, 400));
        assert_eq!(intent_of(verdict), Some(NavigationIntent::None));
    }

    #[test]
    fn horizontal_dominant_touch_is_foreign() {
        let verdict = classifier().classify_touch(&swipe(40.0, 5.0, 150));
        assert_eq!(verdict, TouchVerdict::Foreign);
    }
}
