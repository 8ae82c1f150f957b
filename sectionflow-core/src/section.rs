//! Ordered, fixed list of full-viewport sections.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{NavigationError, Result};

/// Opaque reference to a section element, resolved once by the host when
/// the stage is built. The core never looks the element up again.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SectionHandle(pub u64);

/// Host-side description of a section handed to the builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub handle: SectionHandle,
    /// Optional anchor name (an element id) that click targets can jump to.
    #[serde(default)]
    pub anchor: Option<String>,
}

impl SectionSpec {
    pub fn new(handle: SectionHandle) -> Self {
        Self {
            handle,
            anchor: None,
        }
    }

    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub index: usize,
    pub handle: SectionHandle,
    pub anchor: Option<String>,
}

/// Sections in document order. Indices are contiguous `0..len` and the
/// order never changes after construction.
#[derive(Debug, Clone)]
pub struct SectionList {
    sections: Vec<Section>,
    by_handle: HashMap<SectionHandle, usize>,
}

impl SectionList {
    pub fn new(specs: Vec<SectionSpec>) -> Result<Self> {
        if specs.is_empty() {
            return Err(NavigationError::NoSections);
        }

        let mut by_handle = HashMap::with_capacity(specs.len());
        let mut sections = Vec::with_capacity(specs.len());
        for (index, spec) in specs.into_iter().enumerate() {
            if by_handle.insert(spec.handle, index).is_some() {
                return Err(NavigationError::DuplicateHandle(spec.handle.0));
            }
            sections.push(Section {
                index,
                handle: spec.handle,
                anchor: spec.anchor,
            });
        }

        Ok(Self {
            sections,
            by_handle,
        })
    }

    /// Convenience for hosts that number their sections `0..count`.
    pub fn with_count(count: usize) -> Result<Self> {
        Self::new(
            (0..count as u64)
                .map(|i| SectionSpec::new(SectionHandle(i)))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always false; an empty list cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.sections.len() - 1
    }

    pub fn get(&self, index: usize) -> Result<&Section> {
        self.sections.get(index).ok_or(NavigationError::OutOfRange {
            index,
            len: self.sections.len(),
        })
    }

    pub fn index_of_handle(&self, handle: SectionHandle) -> Option<usize> {
        self.by_handle.get(&handle).copied()
    }

    pub fn index_of_anchor(&self, anchor: &str) -> Option<usize> {
        self.sections
            .iter()
            .find(|s| s.anchor.as_deref() == Some(anchor))
            .map(|s| s.index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }
}
