//! Image lightbox collaborator.

use serde::{Deserialize, Serialize};

use crate::surface::ModalSurface;

/// Image shown in the lightbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

impl ImageRef {
    pub fn new(src: impl Into<String>, alt: Option<&str>) -> Self {
        Self {
            src: src.into(),
            alt: alt.unwrap_or_default().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
    pub visible: bool,
    pub image: Option<ImageRef>,
}

/// Lightbox state plus its optional surface. Without a surface every
/// operation is a no-op.
pub struct Lightbox {
    state: ModalState,
    surface: Option<Box<dyn ModalSurface>>,
}

impl std::fmt::Debug for Lightbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lightbox")
            .field("state", &self.state)
            .field("surface", &self.surface.as_ref().map(|_| "<dyn ModalSurface>"))
            .finish()
    }
}

impl Lightbox {
    pub fn new(surface: Option<Box<dyn ModalSurface>>) -> Self {
        Self {
            state: ModalState::default(),
            surface,
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    pub fn open(&mut self, image: ImageRef) {
        let Some(surface) = self.surface.as_mut() else {
            tracing::debug!(src = %image.src, "no modal surface, open ignored");
            return;
        };
        surface.show(&image);
        self.state = ModalState {
            visible: true,
            image: Some(image),
        };
    }

    /// Hide the lightbox. Returns whether it was visible.
    pub fn close(&mut self) -> bool {
        if !self.state.visible {
            return false;
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.hide();
        }
        self.state.visible = false;
        true
    }

    /// Click on the modal element. Only a click on the overlay itself (not
    /// on the image inside it) dismisses.
    pub fn backdrop_click(&mut self, on_overlay: bool) -> bool {
        on_overlay && self.close()
    }
}
