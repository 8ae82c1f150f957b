#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use sectionflow_core::{
    CarouselSurface, FeedbackSurface, ImageRef, IntersectionEntry,
    ModalSurface, Point, ScrollBehavior, SectionHandle, SectionSpec,
    SectionSurface, StageBuilder, StageController, VirtualTimeProvider,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ScrollIntoView(u64, ScrollBehavior),
    CarouselBy(f32, ScrollBehavior),
    ShowModal(String),
    HideModal,
    Haptic(u32),
    Highlight(bool),
}

/// Shared effect log handed to every surface.
#[derive(Debug, Clone, Default)]
pub struct Recorder(Rc<RefCell<Vec<Effect>>>);

impl Recorder {
    pub fn effects(&self) -> Vec<Effect> {
        self.0.borrow().clone()
    }

    pub fn scrolls(&self) -> Vec<u64> {
        self.0
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Effect::ScrollIntoView(h, _) => Some(*h),
                _ => None,
            })
            .collect()
    }

    fn push(&self, effect: Effect) {
        self.0.borrow_mut().push(effect);
    }
}

impl SectionSurface for Recorder {
    fn scroll_into_view(&mut self, section: SectionHandle, behavior: ScrollBehavior) {
        self.push(Effect::ScrollIntoView(section.0, behavior));
    }
}

impl CarouselSurface for Recorder {
    fn scroll_by(&mut self, dx: f32, behavior: ScrollBehavior) {
        self.push(Effect::CarouselBy(dx, behavior));
    }
}

impl ModalSurface for Recorder {
    fn show(&mut self, image: &ImageRef) {
        self.push(Effect::ShowModal(image.src.clone()));
    }

    fn hide(&mut self) {
        self.push(Effect::HideModal);
    }
}

impl FeedbackSurface for Recorder {
    fn haptic_pulse(&mut self, duration_ms: u32) {
        self.push(Effect::Haptic(duration_ms));
    }

    fn touch_highlight(&mut self, _at: Point, active: bool) {
        self.push(Effect::Highlight(active));
    }
}

pub struct Stage {
    pub controller: StageController,
    pub clock: VirtualTimeProvider,
    pub recorder: Recorder,
}

pub fn sections(count: u64) -> Vec<SectionSpec> {
    (0..count).map(|i| SectionSpec::new(SectionHandle(i))).collect()
}

/// Five sections, no optional collaborators.
pub fn stage(start: usize) -> Stage {
    stage_with(StageBuilder::new(sections(5)).start_at(start))
}

pub fn stage_with(builder: StageBuilder) -> Stage {
    let clock = VirtualTimeProvider::new();
    let recorder = Recorder::default();
    let controller = builder
        .clock(clock.clone())
        .build(recorder.clone())
        .expect("stage builds");
    Stage {
        controller,
        clock,
        recorder,
    }
}

impl Stage {
    pub fn advance(&mut self, ms: u64) {
        self.clock.advance_ms(ms);
        self.controller.tick();
    }

    pub fn visible(&mut self, ratios: &[(u64, f32)]) {
        let entries = ratios
            .iter()
            .map(|(h, ratio)| IntersectionEntry {
                section: SectionHandle(*h),
                ratio: *ratio,
            })
            .collect();
        self.controller
            .handle(sectionflow_core::InputEvent::Intersection { entries });
    }
}
