//! Section navigator: turns an admitted target into a viewport effect.

use crate::error::Result;
use crate::section::{SectionHandle, SectionList};
use crate::surface::{ScrollBehavior, SectionSurface};

#[derive(Debug, Clone)]
pub struct SectionNavigator {
    sections: SectionList,
    reduced_motion: bool,
}

impl SectionNavigator {
    pub fn new(sections: SectionList, reduced_motion: bool) -> Self {
        Self {
            sections,
            reduced_motion,
        }
    }

    pub fn sections(&self) -> &SectionList {
        &self.sections
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    pub fn behavior(&self) -> ScrollBehavior {
        ScrollBehavior::for_motion(self.reduced_motion)
    }

    /// Bring `target` into view. Out-of-range targets are rejected without
    /// touching the surface.
    pub fn navigate(
        &self,
        surface: &mut dyn SectionSurface,
        target: usize,
    ) -> Result<SectionHandle> {
        let section = self.sections.get(target).inspect_err(|err| {
            tracing::warn!(%err, "navigation target rejected");
        })?;
        let behavior = self.behavior();

        tracing::debug!(target, handle = section.handle.0, ?behavior, "scroll into view");
        surface.scroll_into_view(section.handle, behavior);
        Ok(section.handle)
    }
}
