//! Nested horizontal carousel
//!
//! The carousel owns its scroll offset; nothing here touches navigation
//! state. The core only needs its bounds (for arbitration) and a way to
//! step it from the arrow buttons.

use serde::{Deserialize, Serialize};

use crate::arbiter::Bounds;
use crate::surface::{CarouselSurface, ScrollBehavior};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarouselDirection {
    Left,
    Right,
}

impl CarouselDirection {
    fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Horizontal scroll position as last known to the core.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CarouselState {
    pub scroll_x: f32,
    /// Unknown until the host reports layout; stepping is unclamped until
    /// then.
    pub max_scroll: Option<f32>,
}

impl CarouselState {
    fn clamp(&self, x: f32) -> f32 {
        match self.max_scroll {
            Some(max) => x.clamp(0.0, max.max(0.0)),
            None => x,
        }
    }
}

pub struct Carousel {
    bounds: Bounds,
    step: f32,
    state: CarouselState,
    surface: Option<Box<dyn CarouselSurface>>,
}

impl std::fmt::Debug for Carousel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("bounds", &self.bounds)
            .field("step", &self.step)
            .field("state", &self.state)
            .field(
                "surface",
                &self.surface.as_ref().map(|_| "<dyn CarouselSurface>"),
            )
            .finish()
    }
}

impl Carousel {
    pub fn new(
        bounds: Bounds,
        step: f32,
        surface: Option<Box<dyn CarouselSurface>>,
    ) -> Self {
        Self {
            bounds,
            step,
            state: CarouselState::default(),
            surface,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    /// Host report of the real offset and extent (native scroll events).
    pub fn report_scroll(&mut self, scroll_x: f32, max_scroll: f32) {
        self.state.max_scroll = Some(max_scroll);
        self.state.scroll_x = self.state.clamp(scroll_x);
    }

    /// Step one page in `direction`. Returns the requested delta, which is
    /// zero when already at that edge or when no surface is attached.
    pub fn scroll(
        &mut self,
        direction: CarouselDirection,
        behavior: ScrollBehavior,
    ) -> f32 {
        let Some(surface) = self.surface.as_mut() else {
            tracing::debug!(?direction, "no carousel surface, scroll ignored");
            return 0.0;
        };

        let from = self.state.scroll_x;
        let to = self.state.clamp(from + direction.sign() * self.step);
        let dx = to - from;
        if dx.abs() < 0.5 {
            return 0.0;
        }

        surface.scroll_by(dx, behavior);
        self.state.scroll_x = to;
        dx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MockCarouselSurface;
    use mockall::predicate::eq;

    fn bounds() -> Bounds {
        Bounds::new(0.0, 300.0, 800.0, 200.0)
    }

    #[test]
    fn steps_by_configured_amount() {
        let mut surface = MockCarouselSurface::new();
        surface
            .expect_scroll_by()
            .with(eq(220.0), eq(ScrollBehavior::Smooth))
            .times(1)
            .return_const(());
        surface
            .expect_scroll_by()
            .with(eq(-220.0), eq(ScrollBehavior::Smooth))
            .times(1)
            .return_const(());
        let mut carousel = Carousel::new(bounds(), 220.0, Some(Box::new(surface)));

        assert_eq!(carousel.scroll(CarouselDirection::Right, ScrollBehavior::Smooth), 220.0);
        assert_eq!(carousel.scroll(CarouselDirection::Left, ScrollBehavior::Smooth), -220.0);
    }

    #[test]
    fn clamps_once_extent_is_known() {
        let mut surface = MockCarouselSurface::new();
        surface
            .expect_scroll_by()
            .with(eq(100.0), eq(ScrollBehavior::Instant))
            .times(1)
            .return_const(());
        let mut carousel = Carousel::new(bounds(), 220.0, Some(Box::new(surface)));
        carousel.report_scroll(400.0, 500.0);

        assert_eq!(carousel.scroll(CarouselDirection::Right, ScrollBehavior::Instant), 100.0);
        // at the right edge now: nothing requested
        assert_eq!(carousel.scroll(CarouselDirection::Right, ScrollBehavior::Instant), 0.0);
    }

    #[test]
    fn left_edge_requests_nothing() {
        let mut surface = MockCarouselSurface::new();
        surface.expect_scroll_by().never();
        let mut carousel = Carousel::new(bounds(), 220.0, Some(Box::new(surface)));
        carousel.report_scroll(0.0, 900.0);

        assert_eq!(carousel.scroll(CarouselDirection::Left, ScrollBehavior::Smooth), 0.0);
    }

    #[test]
    fn missing_surface_is_a_no_op() {
        let mut carousel = Carousel::new(bounds(), 220.0, None);

        assert_eq!(carousel.scroll(CarouselDirection::Right, ScrollBehavior::Smooth), 0.0);
        assert_eq!(carousel.state().scroll_x, 0.0);
    }
}
