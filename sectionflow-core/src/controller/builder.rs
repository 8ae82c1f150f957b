//! One-time wiring of sections, collaborators and tunables.

use sectionflow_config::NavigatorConfig;

use crate::arbiter::{Bounds, NestedWidgetArbiter};
use crate::carousel::Carousel;
use crate::error::Result;
use crate::gesture::GestureClassifier;
use crate::lock::TransitionLock;
use crate::modal::Lightbox;
use crate::navigator::SectionNavigator;
use crate::rate_limit::{Debouncer, Throttle};
use crate::section::{SectionList, SectionSpec};
use crate::surface::{
    CarouselSurface, FeedbackSurface, ModalSurface, SectionSurface,
};
use crate::time::{SystemTimeProvider, TimeProvider};
use crate::viewport::ViewportTracker;

use super::{NextSectionTarget, StageController};

/// Collects everything the controller needs before the first event.
///
/// Element lookups happen here, once; the controller only ever sees the
/// resulting handles and surfaces.
pub struct StageBuilder {
    sections: Vec<SectionSpec>,
    start_index: usize,
    next_anchor: Option<String>,
    carousel_bounds: Option<Bounds>,
    carousel_surface: Option<Box<dyn CarouselSurface>>,
    modal_surface: Option<Box<dyn ModalSurface>>,
    feedback: Option<Box<dyn FeedbackSurface>>,
    config: NavigatorConfig,
    clock: Option<Box<dyn TimeProvider>>,
}

impl std::fmt::Debug for StageBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageBuilder")
            .field("sections", &self.sections.len())
            .field("start_index", &self.start_index)
            .field("next_anchor", &self.next_anchor)
            .field("carousel_bounds", &self.carousel_bounds)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl StageBuilder {
    pub fn new(sections: Vec<SectionSpec>) -> Self {
        Self {
            sections,
            start_index: 0,
            next_anchor: None,
            carousel_bounds: None,
            carousel_surface: None,
            modal_surface: None,
            feedback: None,
            config: NavigatorConfig::default(),
            clock: None,
        }
    }

    pub fn start_at(mut self, index: usize) -> Self {
        self.start_index = index;
        self
    }

    /// Section the next-section button jumps to. Without one, the button
    /// steps to the following section.
    pub fn next_section_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.next_anchor = Some(anchor.into());
        self
    }

    /// Nested carousel bounds used for arbitration, plus the surface its
    /// arrow buttons drive.
    pub fn carousel(
        mut self,
        bounds: Bounds,
        surface: impl CarouselSurface + 'static,
    ) -> Self {
        self.carousel_bounds = Some(bounds);
        self.carousel_surface = Some(Box::new(surface));
        self
    }

    /// Carousel bounds without arrow buttons.
    pub fn carousel_bounds(mut self, bounds: Bounds) -> Self {
        self.carousel_bounds = Some(bounds);
        self
    }

    pub fn modal(mut self, surface: impl ModalSurface + 'static) -> Self {
        self.modal_surface = Some(Box::new(surface));
        self
    }

    pub fn feedback(mut self, surface: impl FeedbackSurface + 'static) -> Self {
        self.feedback = Some(Box::new(surface));
        self
    }

    pub fn config(mut self, config: NavigatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn clock(mut self, clock: impl TimeProvider) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    pub fn build(
        self,
        surface: impl SectionSurface + 'static,
    ) -> Result<StageController> {
        self.config.validate()?;
        let sections = SectionList::new(self.sections)?;
        let cfg = self.config;

        let lock = TransitionLock::new(sections.len(), self.start_index, cfg.lock)?;
        let tracker =
            ViewportTracker::new(sections.len(), self.start_index, cfg.viewport);

        let next_section = match self.next_anchor {
            Some(anchor) => match sections.index_of_anchor(&anchor) {
                Some(index) => NextSectionTarget::Index(index),
                None => {
                    tracing::warn!(%anchor, "next-section anchor not found, button disabled");
                    NextSectionTarget::Disabled
                }
            },
            None => NextSectionTarget::Step,
        };

        let carousel = self.carousel_bounds.map(|bounds| {
            Carousel::new(bounds, cfg.carousel.step_px, self.carousel_surface)
        });

        tracing::debug!(
            sections = sections.len(),
            start = self.start_index,
            carousel = carousel.is_some(),
            "stage built"
        );

        Ok(StageController {
            classifier: GestureClassifier::new(cfg.gesture),
            arbiter: NestedWidgetArbiter::new(self.carousel_bounds),
            lock,
            tracker,
            navigator: SectionNavigator::new(sections, cfg.motion.reduced_motion),
            wheel: Debouncer::new(cfg.rate_limit.wheel_debounce()),
            touch_throttle: Throttle::new(cfg.rate_limit.touch_move_throttle()),
            touch: None,
            carousel,
            lightbox: Lightbox::new(self.modal_surface),
            section_surface: Box::new(surface),
            feedback: self.feedback,
            next_section,
            clock: self
                .clock
                .unwrap_or_else(|| Box::new(SystemTimeProvider)),
            config: cfg,
        })
    }
}
