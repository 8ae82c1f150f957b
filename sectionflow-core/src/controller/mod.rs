//! Stage controller
//!
//! Owns every component and runs the pipeline for each raw event:
//! classifier -> arbiter -> transition lock -> navigator, with the viewport
//! tracker closing the loop. Single-threaded and run-to-completion; the
//! only deferred work is timer deadlines (wheel debounce, settle delay,
//! lock timeout), evaluated at the start of every `handle` and on `tick`.

pub mod builder;
pub mod event;

use std::time::Instant;

use sectionflow_config::NavigatorConfig;

use crate::arbiter::{Arbitration, Bounds, NestedWidgetArbiter, Ownership};
use crate::carousel::{Carousel, CarouselDirection, CarouselState};
use crate::error::Result;
use crate::gesture::{
    GestureClassifier, GestureSample, GestureSignal, Key, Point, TouchVerdict,
};
use crate::lock::{Admission, NavigationState, ReleaseReason, Transition, TransitionLock};
use crate::modal::{Lightbox, ModalState};
use crate::navigator::SectionNavigator;
use crate::rate_limit::{Debouncer, Throttle};
use crate::section::{SectionHandle, SectionSpec};
use crate::surface::{FeedbackSurface, SectionSurface};
use crate::time::TimeProvider;
use crate::viewport::{IntersectionEntry, ViewportTracker};

pub use builder::StageBuilder;
pub use event::{ClickTarget, EventOutcome, InputEvent};

/// Haptic pulse length for an admitted touch transition.
const TOUCH_HAPTIC_MS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NextSectionTarget {
    Index(usize),
    Step,
    Disabled,
}

pub struct StageController {
    config: NavigatorConfig,
    classifier: GestureClassifier,
    arbiter: NestedWidgetArbiter,
    lock: TransitionLock,
    tracker: ViewportTracker,
    navigator: SectionNavigator,
    wheel: Debouncer<f32>,
    touch_throttle: Throttle,
    touch: Option<GestureSample>,
    carousel: Option<Carousel>,
    lightbox: Lightbox,
    section_surface: Box<dyn SectionSurface>,
    feedback: Option<Box<dyn FeedbackSurface>>,
    next_section: NextSectionTarget,
    clock: Box<dyn TimeProvider>,
}

impl std::fmt::Debug for StageController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageController")
            .field("lock", &self.lock)
            .field("tracker", &self.tracker)
            .field("touch", &self.touch)
            .field("carousel", &self.carousel)
            .field("lightbox", &self.lightbox)
            .field("next_section", &self.next_section)
            .finish_non_exhaustive()
    }
}

impl StageController {
    pub fn builder(sections: Vec<SectionSpec>) -> StageBuilder {
        StageBuilder::new(sections)
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn state(&self) -> NavigationState {
        self.lock.state()
    }

    pub fn current_index(&self) -> usize {
        self.lock.current_index()
    }

    pub fn section_count(&self) -> usize {
        self.navigator.sections().len()
    }

    /// Handle of the section at `index`.
    pub fn section(&self, index: usize) -> Option<SectionHandle> {
        self.navigator.sections().get(index).ok().map(|s| s.handle)
    }

    pub fn modal_state(&self) -> &ModalState {
        self.lightbox.state()
    }

    pub fn carousel_state(&self) -> Option<CarouselState> {
        self.carousel.as_ref().map(Carousel::state)
    }

    /// Follow the host's reduced-motion preference from now on.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.navigator.set_reduced_motion(reduced);
    }

    /// Layout changed; arbitration uses the new rectangle immediately.
    pub fn set_carousel_bounds(&mut self, bounds: Bounds) {
        self.arbiter.set_bounds(Some(bounds));
        if let Some(carousel) = self.carousel.as_mut() {
            carousel.set_bounds(bounds);
        }
    }

    pub fn report_carousel_scroll(&mut self, scroll_x: f32, max_scroll: f32) {
        if let Some(carousel) = self.carousel.as_mut() {
            carousel.report_scroll(scroll_x, max_scroll);
        }
    }

    /// Earliest pending timer. The host should call `tick` no later than
    /// this (or simply on every animation frame).
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.wheel.deadline(),
            self.tracker.settle_deadline(),
            self.lock.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Run due timers. Returns a transition admitted by a debounced wheel
    /// flush, if one happened.
    pub fn tick(&mut self) -> Option<Transition> {
        let now = self.clock.now();
        self.run_timers(now)
    }

    /// Forced transition to `index`, overriding anything in flight.
    pub fn navigate_to(&mut self, index: usize) -> Result<Transition> {
        let now = self.clock.now();
        if index < self.section_count() {
            // a wheel burst already due must not scroll ahead of the forced one
            self.wheel.cancel();
        }
        self.run_timers(now);
        let transition = self.lock.force_index(index, now)?;
        self.begin(transition, now);
        Ok(transition)
    }

    pub fn handle(&mut self, event: InputEvent) -> EventOutcome {
        let now = self.clock.now();
        self.run_timers(now);

        match event {
            InputEvent::Wheel {
                delta_x,
                delta_y,
                at,
            } => self.on_wheel(delta_x, delta_y, at, now),
            InputEvent::TouchStart { at } => self.on_touch_start(at, now),
            InputEvent::TouchMove { at } => self.on_touch_move(at, now),
            InputEvent::TouchEnd { at } => self.on_touch_end(at, now),
            InputEvent::TouchCancel => {
                if let Some(sample) = self.touch.take() {
                    self.highlight(sample.last_point(), false);
                }
                EventOutcome::default()
            }
            InputEvent::Key { key } => self.on_key(&key, now),
            InputEvent::Click { target } => self.on_click(target),
            InputEvent::Intersection { entries } => {
                self.on_intersection(&entries, now);
                EventOutcome::default()
            }
        }
    }

    fn on_wheel(
        &mut self,
        delta_x: f32,
        delta_y: f32,
        at: Option<Point>,
        now: Instant,
    ) -> EventOutcome {
        let arbitration = match at {
            Some(origin) => self.arbiter.arbitrate(origin, delta_x, delta_y),
            None => Arbitration::page(delta_x, delta_y),
        };
        if arbitration.ownership == Ownership::NestedWidget {
            return EventOutcome::prevent(false);
        }

        tracing::trace!(delta_y, "wheel");
        self.wheel.push(delta_y, now);
        EventOutcome::prevent(arbitration.prevent_default)
    }

    fn on_touch_start(&mut self, at: Point, now: Instant) -> EventOutcome {
        self.touch = Some(GestureSample::begin(at, now));
        // ownership is evaluated at most once per frame from here on
        self.touch_throttle.restart(now);
        self.highlight(at, true);
        EventOutcome::default()
    }

    fn on_touch_move(&mut self, at: Point, now: Instant) -> EventOutcome {
        let slop = self.classifier.config().axis_lock_slop_px;
        let Some(sample) = self.touch.as_mut() else {
            return EventOutcome::default();
        };
        sample.update(at, now);
        let (dx, dy) = sample.displacement();
        let origin = sample.origin();

        let ownership = match sample.ownership() {
            Some(ownership) => ownership,
            None => {
                let decisive = dx.abs().max(dy.abs()) >= slop;
                if !decisive || !self.touch_throttle.try_acquire(now) {
                    return EventOutcome::prevent(
                        self.arbiter.provisional_prevent(origin, dx, dy),
                    );
                }
                let arbitration = self.arbiter.arbitrate(origin, dx, dy);
                sample.latch_ownership(arbitration.ownership);
                tracing::trace!(?arbitration, "touch ownership decided");
                arbitration.ownership
            }
        };

        EventOutcome::prevent(
            ownership == Ownership::Page && dy.abs() >= dx.abs(),
        )
    }

    fn on_touch_end(&mut self, at: Point, now: Instant) -> EventOutcome {
        let Some(mut sample) = self.touch.take() else {
            return EventOutcome::default();
        };
        sample.update(at, now);
        self.highlight(at, false);

        let (dx, dy) = sample.displacement();
        let ownership = sample.ownership().unwrap_or_else(|| {
            self.arbiter.arbitrate(sample.origin(), dx, dy).ownership
        });
        if ownership == Ownership::NestedWidget {
            return EventOutcome::default();
        }

        let signal = match self.classifier.classify_touch(&sample) {
            TouchVerdict::Page(signal) => signal,
            TouchVerdict::Foreign => return EventOutcome::default(),
        };

        let admitted = self.dispatch(signal, now);
        if admitted.is_some_and(|t| !t.boundary)
            && let Some(feedback) = self.feedback.as_mut()
        {
            feedback.haptic_pulse(TOUCH_HAPTIC_MS);
        }

        EventOutcome {
            prevent_default: false,
            admitted,
        }
    }

    fn on_key(&mut self, key: &Key, now: Instant) -> EventOutcome {
        if *key == Key::Escape {
            return EventOutcome::prevent(self.lightbox.close());
        }

        let signal = self.classifier.classify_key(key);
        if signal.intent.is_none() {
            return EventOutcome::default();
        }
        EventOutcome {
            prevent_default: true,
            admitted: self.dispatch(signal, now),
        }
    }

    fn on_click(&mut self, target: ClickTarget) -> EventOutcome {
        match target {
            ClickTarget::NextSection => {
                let index = match self.next_section {
                    NextSectionTarget::Index(index) => index,
                    NextSectionTarget::Step => (self.lock.current_index() + 1)
                        .min(self.section_count() - 1),
                    NextSectionTarget::Disabled => {
                        return EventOutcome::default();
                    }
                };
                EventOutcome {
                    prevent_default: true,
                    admitted: self.navigate_to(index).ok(),
                }
            }
            ClickTarget::CarouselLeft => {
                self.scroll_carousel(CarouselDirection::Left)
            }
            ClickTarget::CarouselRight => {
                self.scroll_carousel(CarouselDirection::Right)
            }
            ClickTarget::OpenImage(image) => {
                self.lightbox.open(image);
                EventOutcome::default()
            }
            ClickTarget::CloseModal => {
                EventOutcome::prevent(self.lightbox.close())
            }
            ClickTarget::ModalBackdrop { on_overlay } => {
                EventOutcome::prevent(self.lightbox.backdrop_click(on_overlay))
            }
        }
    }

    fn scroll_carousel(&mut self, direction: CarouselDirection) -> EventOutcome {
        let behavior = self.navigator.behavior();
        match self.carousel.as_mut() {
            Some(carousel) => {
                carousel.scroll(direction, behavior);
            }
            None => tracing::debug!(?direction, "no carousel, click ignored"),
        }
        EventOutcome::default()
    }

    fn on_intersection(&mut self, entries: &[IntersectionEntry], now: Instant) {
        if let Some(index) =
            self.tracker.observe(self.navigator.sections(), entries, now)
        {
            self.lock.confirm_arrival(index);
        }
    }

    fn run_timers(&mut self, now: Instant) -> Option<Transition> {
        if let Some(index) = self.tracker.poll_settle(now)
            && self.lock.target() == Some(index)
        {
            self.lock.release(ReleaseReason::Arrived);
        }

        if self.lock.poll_timeout(now) {
            // the viewport never confirmed; trust what it last reported
            self.lock.confirm_arrival(self.tracker.index());
        }

        let delta_y = self.wheel.poll(now)?;
        let signal = self.classifier.classify_wheel(delta_y);
        self.dispatch(signal, now)
    }

    fn dispatch(&mut self, signal: GestureSignal, now: Instant) -> Option<Transition> {
        if signal.intent.is_none() {
            return None;
        }
        match self.lock.admit(signal.intent, false, now) {
            Admission::Admitted(transition) => {
                tracing::debug!(
                    source = ?signal.source,
                    confidence = signal.confidence,
                    target = transition.target,
                    "intent admitted"
                );
                self.begin(transition, now);
                Some(transition)
            }
            Admission::Rejected(reason) => {
                tracing::trace!(source = ?signal.source, ?reason, "intent dropped");
                None
            }
        }
    }

    /// Perform the effect of an admitted transition.
    fn begin(&mut self, transition: Transition, now: Instant) {
        if transition.forced {
            // a deliberate UI action must not race a stale wheel burst or a
            // settle armed for the transition it replaced
            self.wheel.cancel();
            self.tracker.cancel_settle();
        }
        if transition.boundary {
            return;
        }
        if let Err(err) = self
            .navigator
            .navigate(self.section_surface.as_mut(), transition.target)
        {
            tracing::warn!(%err, "navigation failed, releasing lock");
            self.lock.release(ReleaseReason::Aborted);
            return;
        }
        if transition.target == self.tracker.index() {
            // the viewport is already there and will report no arrival
            self.tracker.arm_settle(transition.target, now);
        }
    }

    fn highlight(&mut self, at: Point, active: bool) {
        if let Some(feedback) = self.feedback.as_mut() {
            feedback.touch_highlight(at, active);
        }
    }
}
