//! Section navigation core for full-viewport "scrollytelling" pages.
//!
//! Maps a noisy stream of wheel, touch and keyboard input onto discrete,
//! one-at-a-time section transitions, while letting a nested horizontal
//! carousel keep its own gestures. Rendering is delegated to the host
//! through the traits in [`surface`]; the core decides only which section
//! is active and whether a transition may start.
//!
//! The entry point is [`StageController`], assembled with [`StageBuilder`].

pub mod arbiter;
pub mod carousel;
pub mod controller;
pub mod error;
pub mod gesture;
pub mod lock;
pub mod modal;
pub mod navigator;
pub mod rate_limit;
pub mod section;
pub mod surface;
pub mod time;
pub mod viewport;

pub use arbiter::{Bounds, NestedWidgetArbiter, Ownership};
pub use carousel::{Carousel, CarouselDirection, CarouselState};
pub use controller::{
    ClickTarget, EventOutcome, InputEvent, StageBuilder, StageController,
};
pub use error::{NavigationError, Result};
pub use gesture::{
    GestureClassifier, GestureSample, GestureSignal, InputSource, Key,
    NavigationIntent, Point, TouchVerdict,
};
pub use lock::{
    Admission, LockPhase, NavigationState, RejectReason, ReleaseReason,
    Transition, TransitionLock,
};
pub use modal::{ImageRef, Lightbox, ModalState};
pub use navigator::SectionNavigator;
pub use section::{Section, SectionHandle, SectionList, SectionSpec};
pub use surface::{
    CarouselSurface, FeedbackSurface, ModalSurface, ScrollBehavior,
    SectionSurface,
};
pub use time::{SystemTimeProvider, TimeProvider, VirtualTimeProvider};
pub use viewport::{IntersectionEntry, ViewportTracker};

pub use sectionflow_config::{BoundaryRelease, NavigatorConfig};
