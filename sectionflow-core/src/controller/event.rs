//! Input boundary types for the stage controller.

use serde::{Deserialize, Serialize};

use crate::gesture::{Key, Point};
use crate::lock::Transition;
use crate::modal::ImageRef;
use crate::viewport::IntersectionEntry;

/// Raw input delivered by the host, in arrival order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    Wheel {
        #[serde(default)]
        delta_x: f32,
        delta_y: f32,
        /// Pointer position, when the host has one.
        #[serde(default)]
        at: Option<Point>,
    },
    TouchStart {
        at: Point,
    },
    TouchMove {
        at: Point,
    },
    TouchEnd {
        at: Point,
    },
    TouchCancel,
    Key {
        key: Key,
    },
    Click {
        target: ClickTarget,
    },
    Intersection {
        entries: Vec<IntersectionEntry>,
    },
}

/// Named interactive elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClickTarget {
    /// Scroll-down affordance; forces a transition past anything in flight.
    NextSection,
    CarouselLeft,
    CarouselRight,
    OpenImage(ImageRef),
    CloseModal,
    /// Click on the modal element; `on_overlay` is false when the click
    /// landed on the image inside it.
    ModalBackdrop {
        on_overlay: bool,
    },
}

/// What the host should do with the raw event, and what it caused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    /// Call `preventDefault` on the native event.
    pub prevent_default: bool,
    /// Transition admitted while handling the event, if any.
    pub admitted: Option<Transition>,
}

impl EventOutcome {
    pub(crate) fn prevent(prevent_default: bool) -> Self {
        Self {
            prevent_default,
            admitted: None,
        }
    }
}
