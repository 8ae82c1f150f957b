//! Viewport tracker
//!
//! Consumes visibility reports (IntersectionObserver entries on the host
//! side) and keeps the authoritative index of the section filling the
//! viewport. It reacts to any scrolling, including scrollbar drags that
//! never went through the navigator. Arrival at a new section arms a short
//! settle timer; when it fires the controller releases the transition lock.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use sectionflow_config::ViewportConfig;

use crate::section::{SectionHandle, SectionList};

/// Visible fraction of one section, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntersectionEntry {
    pub section: SectionHandle,
    pub ratio: f32,
}

#[derive(Debug, Clone)]
pub struct ViewportTracker {
    ratios: Vec<f32>,
    index: usize,
    enter_ratio: f32,
    exit_ratio: f32,
    settle_delay: Duration,
    pending_settle: Option<(usize, Instant)>,
}

impl ViewportTracker {
    pub fn new(section_count: usize, start_index: usize, cfg: ViewportConfig) -> Self {
        let mut ratios = vec![0.0; section_count];
        if let Some(r) = ratios.get_mut(start_index) {
            *r = 1.0;
        }
        Self {
            ratios,
            index: start_index,
            enter_ratio: cfg.enter_ratio,
            exit_ratio: cfg.exit_ratio,
            settle_delay: cfg.settle_delay(),
            pending_settle: None,
        }
    }

    /// Last section the viewport was observed on.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn ratio(&self, index: usize) -> Option<f32> {
        self.ratios.get(index).copied()
    }

    /// Fold a batch of entries into the ratio table and re-evaluate the
    /// current section. Returns the new index when it changed.
    ///
    /// The most visible section at or above `enter_ratio` wins. The current
    /// section keeps its place until it falls below `exit_ratio` or is
    /// strictly out-shown, so a panel hovering around one threshold cannot
    /// flap.
    pub fn observe(
        &mut self,
        sections: &SectionList,
        entries: &[IntersectionEntry],
        now: Instant,
    ) -> Option<usize> {
        for entry in entries {
            match sections.index_of_handle(entry.section) {
                Some(i) => self.ratios[i] = entry.ratio.clamp(0.0, 1.0),
                None => {
                    tracing::trace!(handle = entry.section.0, "entry for unknown section");
                }
            }
        }

        let (best, best_ratio) = self
            .ratios
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, r)| *r >= self.enter_ratio)
            .fold(None::<(usize, f32)>, |acc, (i, r)| match acc {
                Some((_, best)) if best >= r => acc,
                _ => Some((i, r)),
            })?;

        if best == self.index {
            return None;
        }
        let current_ratio = self.ratios[self.index];
        if current_ratio >= self.exit_ratio && current_ratio >= best_ratio {
            return None;
        }

        tracing::trace!(from = self.index, to = best, ratio = best_ratio, "viewport arrival");
        self.index = best;
        self.pending_settle = Some((best, now + self.settle_delay));
        Some(best)
    }

    /// Index whose settle delay has elapsed, if any. Fires once per arrival.
    pub fn poll_settle(&mut self, now: Instant) -> Option<usize> {
        match self.pending_settle {
            Some((index, at)) if now >= at => {
                self.pending_settle = None;
                Some(index)
            }
            _ => None,
        }
    }

    /// Arm a settle for `index` without a visibility change, for a
    /// transition whose target the viewport already shows.
    pub fn arm_settle(&mut self, index: usize, now: Instant) {
        self.pending_settle = Some((index, now + self.settle_delay));
    }

    pub fn settle_deadline(&self) -> Option<Instant> {
        self.pending_settle.map(|(_, at)| at)
    }

    pub fn cancel_settle(&mut self) -> bool {
        self.pending_settle.take().is_some()
    }
}
