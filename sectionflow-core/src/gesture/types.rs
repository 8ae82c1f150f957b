//! Shared types for gesture classification

use serde::{Deserialize, Serialize};

/// Classified navigational direction of a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationIntent {
    Next,
    Previous,
    #[default]
    None,
}

impl NavigationIntent {
    /// Index step implied by the intent: +1, -1 or 0.
    pub fn step(self) -> isize {
        match self {
            Self::Next => 1,
            Self::Previous => -1,
            Self::None => 0,
        }
    }

    pub fn is_none(self) -> bool {
        self == Self::None
    }
}

/// Input device that produced a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
    Wheel,
    Touch,
    Key,
    /// Explicit UI affordance (a button), never classified.
    Click,
}

/// Semantic signal produced by the classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSignal {
    pub intent: NavigationIntent,
    pub source: InputSource,
    /// 0.0 for `None`, otherwise how decisively the gesture cleared its
    /// threshold, saturating at 1.0 once it is twice the threshold.
    pub confidence: f32,
}

impl GestureSignal {
    pub fn none(source: InputSource) -> Self {
        Self {
            intent: NavigationIntent::None,
            source,
            confidence: 0.0,
        }
    }
}

/// Result of classifying a completed touch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchVerdict {
    /// Page-level signal (which may still carry `NavigationIntent::None`).
    Page(GestureSignal),
    /// Mostly-horizontal gesture that belongs to a nested widget.
    Foreign,
}

/// Point in viewport coordinates (CSS px).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Named keys the page cares about. Anything else is carried as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Key {
    ArrowDown,
    ArrowUp,
    PageDown,
    PageUp,
    Escape,
    Other(String),
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowDown" => Self::ArrowDown,
            "ArrowUp" => Self::ArrowUp,
            "PageDown" => Self::PageDown,
            "PageUp" => Self::PageUp,
            "Escape" | "Esc" => Self::Escape,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::ArrowDown => "ArrowDown",
            Self::ArrowUp => "ArrowUp",
            Self::PageDown => "PageDown",
            Self::PageUp => "PageUp",
            Self::Escape => "Escape",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.name().to_string()
    }
}
