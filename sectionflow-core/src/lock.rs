//! Transition lock / scheduler
//!
//! Two-state machine (`Idle`, `Transitioning`) that serializes section
//! transitions and owns `NavigationState`. Nothing else writes the current
//! index or the lock flag:
//!
//! - `admit` / `force_index` move `Idle -> Transitioning` and update the
//!   current index optimistically so UI feedback can follow immediately.
//! - `release` (arrival confirmed by the viewport tracker) and
//!   `poll_timeout` (no confirmation within the timeout) move back to
//!   `Idle`. Smooth scroll-into-view reports no completion, so without the
//!   timeout a lost transition would wedge the machine forever.
//! - While `Transitioning`, only forced admissions get through; they
//!   replace the in-flight target.

use std::time::{Duration, Instant};

use sectionflow_config::{BoundaryRelease, LockConfig};

use crate::error::{NavigationError, Result};
use crate::gesture::NavigationIntent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockPhase {
    #[default]
    Idle,
    Transitioning {
        origin: usize,
        target: usize,
        started_at: Instant,
        expires_at: Instant,
        forced: bool,
    },
}

/// Snapshot of the navigation singleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    pub current_index: usize,
    pub locked: bool,
    pub lock_expires_at: Option<Instant>,
}

/// Why an intent was not admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NoIntent,
    Busy,
}

/// An admitted transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub target: usize,
    pub forced: bool,
    /// Target of the in-flight transition this one replaced.
    pub preempted: Option<usize>,
    /// Target equals the current index (first/last section). No effect
    /// should be requested for it.
    pub boundary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted(Transition),
    Rejected(RejectReason),
}

impl Admission {
    pub fn transition(&self) -> Option<Transition> {
        match self {
            Self::Admitted(t) => Some(*t),
            Self::Rejected(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseReason {
    Arrived,
    TimedOut,
    Boundary,
    /// The effect could not be performed.
    Aborted,
}

#[derive(Debug, Clone)]
pub struct TransitionLock {
    phase: LockPhase,
    current_index: usize,
    section_count: usize,
    timeout: Duration,
    boundary_release: BoundaryRelease,
}

impl TransitionLock {
    pub fn new(
        section_count: usize,
        start_index: usize,
        cfg: LockConfig,
    ) -> Result<Self> {
        if section_count == 0 {
            return Err(NavigationError::NoSections);
        }
        if start_index >= section_count {
            return Err(NavigationError::OutOfRange {
                index: start_index,
                len: section_count,
            });
        }

        Ok(Self {
            phase: LockPhase::Idle,
            current_index: start_index,
            section_count,
            timeout: cfg.timeout(),
            boundary_release: cfg.boundary_release,
        })
    }

    pub fn phase(&self) -> LockPhase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.phase, LockPhase::Transitioning { .. })
    }

    /// Target of the in-flight transition, if any.
    pub fn target(&self) -> Option<usize> {
        match self.phase {
            LockPhase::Transitioning { target, .. } => Some(target),
            LockPhase::Idle => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self.phase {
            LockPhase::Transitioning { expires_at, .. } => Some(expires_at),
            LockPhase::Idle => None,
        }
    }

    pub fn state(&self) -> NavigationState {
        NavigationState {
            current_index: self.current_index,
            locked: self.is_locked(),
            lock_expires_at: self.deadline(),
        }
    }

    /// Admit a directional intent. The target is the current index stepped
    /// once in the intent's direction, clamped to the section range.
    pub fn admit(
        &mut self,
        intent: NavigationIntent,
        force: bool,
        now: Instant,
    ) -> Admission {
        if intent.is_none() {
            return Admission::Rejected(RejectReason::NoIntent);
        }

        let last = self.section_count - 1;
        let target = self
            .current_index
            .saturating_add_signed(intent.step())
            .min(last);
        self.engage(target, force, now)
    }

    /// Forced transition to an explicit index (UI affordances such as a
    /// "go to section" button). Never rejected for being busy; replaces any
    /// in-flight target.
    pub fn force_index(
        &mut self,
        target: usize,
        now: Instant,
    ) -> Result<Transition> {
        if target >= self.section_count {
            return Err(NavigationError::OutOfRange {
                index: target,
                len: self.section_count,
            });
        }
        Ok(self.take(target, true, now))
    }

    fn engage(&mut self, target: usize, force: bool, now: Instant) -> Admission {
        if let LockPhase::Transitioning { target: inflight, .. } = self.phase
            && !force
        {
            tracing::trace!(inflight, target, "transition busy, dropped");
            return Admission::Rejected(RejectReason::Busy);
        }
        Admission::Admitted(self.take(target, force, now))
    }

    fn take(&mut self, target: usize, force: bool, now: Instant) -> Transition {
        let preempted = self.target();
        let from = self.current_index;
        let boundary = target == from;

        self.phase = LockPhase::Transitioning {
            origin: from,
            target,
            started_at: now,
            expires_at: now + self.timeout,
            forced: force,
        };
        self.current_index = target;

        tracing::debug!(from, target, force, ?preempted, "transition admitted");

        if boundary && self.boundary_release == BoundaryRelease::Immediate {
            self.release(ReleaseReason::Boundary);
        }

        Transition {
            from,
            target,
            forced: force,
            preempted,
            boundary,
        }
    }

    /// Record the index the viewport tracker observed. This is the only way
    /// the current index changes outside an admission (organic scrolling).
    pub fn confirm_arrival(&mut self, index: usize) -> bool {
        if index >= self.section_count || index == self.current_index {
            return false;
        }
        tracing::debug!(
            from = self.current_index,
            to = index,
            "viewport confirmed section"
        );
        self.current_index = index;
        true
    }

    /// Return to `Idle`. Returns whether a transition was held.
    pub fn release(&mut self, reason: ReleaseReason) -> bool {
        match self.phase {
            LockPhase::Transitioning {
                target, started_at, ..
            } => {
                self.phase = LockPhase::Idle;
                tracing::debug!(target, ?reason, held_since = ?started_at, "transition lock released");
                true
            }
            LockPhase::Idle => false,
        }
    }

    /// Release a transition whose timeout has elapsed.
    pub fn poll_timeout(&mut self, now: Instant) -> bool {
        match self.phase {
            LockPhase::Transitioning {
                target, expires_at, ..
            } if now >= expires_at => {
                tracing::warn!(
                    target,
                    "arrival never confirmed, releasing transition lock on timeout"
                );
                self.release(ReleaseReason::TimedOut)
            }
            _ => false,
        }
    }
}
