//! Nested-widget arbitration
//!
//! Decides per gesture whether the page navigator or the nested horizontal
//! carousel owns it. Must be asked during the move phase: by the time a
//! touch ends, the browser may already have started its own elastic
//! scroll.

use serde::{Deserialize, Serialize};

use crate::gesture::Point;

/// Axis-aligned rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x
            && p.x < self.x + self.width
            && p.y >= self.y
            && p.y < self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ownership {
    /// Page-level navigator handles the gesture.
    Page,
    /// The nested widget scrolls natively; the core stays out of the way.
    NestedWidget,
}

/// Arbitration outcome for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arbitration {
    pub ownership: Ownership,
    /// Whether the host should call `preventDefault` on the raw event.
    pub prevent_default: bool,
}

impl Arbitration {
    /// Page-owned gesture; native scrolling is suppressed for vertical
    /// motion only.
    pub fn page(dx: f32, dy: f32) -> Self {
        Self {
            ownership: Ownership::Page,
            prevent_default: dy.abs() >= dx.abs(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NestedWidgetArbiter {
    bounds: Option<Bounds>,
}

impl NestedWidgetArbiter {
    pub fn new(bounds: Option<Bounds>) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// The host reports new bounds after layout changes.
    pub fn set_bounds(&mut self, bounds: Option<Bounds>) {
        self.bounds = bounds;
    }

    /// Gesture ownership given its origin and displacement so far.
    ///
    /// Only a horizontal-dominant gesture that starts inside the nested
    /// widget belongs to it. Everything else is the page's, and vertical
    /// page gestures suppress native scrolling so the one-section-at-a-time
    /// transition is the only vertical motion.
    pub fn arbitrate(&self, origin: Point, dx: f32, dy: f32) -> Arbitration {
        let inside = self.bounds.is_some_and(|b| b.contains(origin));
        if inside && dx.abs() > dy.abs() {
            return Arbitration {
                ownership: Ownership::NestedWidget,
                prevent_default: false,
            };
        }

        Arbitration::page(dx, dy)
    }

    /// Whether to suppress native scrolling while ownership is still
    /// undecided. Gestures that may yet belong to the nested widget are left
    /// alone; anything else is treated as a page gesture so far.
    pub fn provisional_prevent(&self, origin: Point, dx: f32, dy: f32) -> bool {
        let inside = self.bounds.is_some_and(|b| b.contains(origin));
        !inside && Arbitration::page(dx, dy).prevent_default
    }
}
