//! Gesture classification
//!
//! Normalizes wheel deltas, touch sequences and key presses into a single
//! `GestureSignal { intent, source, confidence }`. Classification is pure;
//! arbitration against nested widgets and admission against the transition
//! lock happen downstream.

pub mod classifier;
pub mod sample;
pub mod types;

pub use classifier::GestureClassifier;
pub use sample::GestureSample;
pub use types::*;
