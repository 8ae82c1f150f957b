//! Per-interaction touch record.

use std::time::{Duration, Instant};

use crate::arbiter::Ownership;

use super::types::Point;

/// Ephemeral record of one touch interaction: created on touch start,
/// updated on move, consumed on end, then dropped.
#[derive(Debug, Clone)]
pub struct GestureSample {
    origin: Point,
    started_at: Instant,
    last: Point,
    last_at: Instant,
    /// Ownership decided by the arbiter during the move phase. Once set it
    /// is never revisited for the rest of the gesture.
    ownership: Option<Ownership>,
}

impl GestureSample {
    pub fn begin(origin: Point, at: Instant) -> Self {
        Self {
            origin,
            started_at: at,
            last: origin,
            last_at: at,
            ownership: None,
        }
    }

    pub fn update(&mut self, point: Point, at: Instant) {
        self.last = point;
        self.last_at = at;
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn last_point(&self) -> Point {
        self.last
    }

    /// Displacement from origin to the latest point as `(dx, dy)`. Positive
    /// `dy` means the finger moved up the screen, i.e. content should move
    /// towards the next section.
    pub fn displacement(&self) -> (f32, f32) {
        (self.origin.x - self.last.x, self.origin.y - self.last.y)
    }

    pub fn elapsed(&self) -> Duration {
        self.last_at.saturating_duration_since(self.started_at)
    }

    /// Average vertical speed in px/ms. A zero-length gesture reports 0.
    pub fn vertical_velocity(&self) -> f32 {
        let ms = self.elapsed().as_secs_f32() * 1000.0;
        if ms <= f32::EPSILON {
            return 0.0;
        }
        self.displacement().1.abs() / ms
    }

    pub fn ownership(&self) -> Option<Ownership> {
        self.ownership
    }

    pub fn latch_ownership(&mut self, ownership: Ownership) {
        if self.ownership.is_none() {
            self.ownership = Some(ownership);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displacement_is_origin_minus_latest() {
        let t0 = Instant::now();
        let mut sample = GestureSample::begin(Point::new(100.0, 400.0), t0);
        sample.update(Point::new(90.0, 340.0), t0 + Duration::from_millis(200));

        assert_eq!(sample.displacement(), (10.0, 60.0));
        assert_eq!(sample.elapsed(), Duration::from_millis(200));
        assert!((sample.vertical_velocity() - 0.3).abs() < 1e-4);
    }

    #[test]
    fn zero_duration_has_zero_velocity() {
        let t0 = Instant::now();
        let mut sample = GestureSample::begin(Point::new(0.0, 0.0), t0);
        sample.update(Point::new(0.0, 80.0), t0);

        assert_eq!(sample.vertical_velocity(), 0.0);
    }

    #[test]
    fn ownership_latches_once() {
        let mut sample = GestureSample::begin(Point::default(), Instant::now());
        sample.latch_ownership(Ownership::NestedWidget);
        sample.latch_ownership(Ownership::Page);

        assert_eq!(sample.ownership(), Some(Ownership::NestedWidget));
    }
}
