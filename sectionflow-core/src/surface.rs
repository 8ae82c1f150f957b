//! Output boundary: effects the core requests of the rendering layer.
//!
//! The host implements these once, over element handles it resolved when
//! building the stage. Only `SectionSurface` is required; a stage built
//! without the others treats their operations as no-ops.

use serde::{Deserialize, Serialize};

use crate::gesture::Point;
use crate::modal::ImageRef;
use crate::section::SectionHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

impl ScrollBehavior {
    pub fn for_motion(reduced_motion: bool) -> Self {
        if reduced_motion {
            Self::Instant
        } else {
            Self::Smooth
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait SectionSurface {
    /// Bring the section element into view.
    fn scroll_into_view(&mut self, section: SectionHandle, behavior: ScrollBehavior);
}

#[cfg_attr(test, mockall::automock)]
pub trait CarouselSurface {
    /// Scroll the nested carousel horizontally by `dx` px.
    fn scroll_by(&mut self, dx: f32, behavior: ScrollBehavior);
}

#[cfg_attr(test, mockall::automock)]
pub trait ModalSurface {
    fn show(&mut self, image: &ImageRef);
    fn hide(&mut self);
}

/// Haptic and visual touch feedback. Every method defaults to a no-op so a
/// host can implement only what its platform supports.
#[cfg_attr(test, mockall::automock)]
pub trait FeedbackSurface {
    fn haptic_pulse(&mut self, _duration_ms: u32) {}

    fn touch_highlight(&mut self, _at: Point, _active: bool) {}
}
