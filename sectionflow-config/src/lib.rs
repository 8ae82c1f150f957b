//! Shared configuration library for sectionflow.
//!
//! This crate centralizes the tunables of the section navigation controller
//! (gesture thresholds, lock timeout, viewport ratios, carousel step, rate
//! limiting windows), their defaults, loading from the environment or a file,
//! and the guard rails that reject inconsistent combinations. The core crate
//! and the `sectionflow-replay` binary both consume these types so there is a
//! single source of truth for defaults.

pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{ConfigLoad, ConfigSource};
pub use models::{
    BoundaryRelease, CarouselConfig, GestureConfig, LockConfig, MotionConfig,
    NavigatorConfig, RateLimitConfig, ViewportConfig,
};
pub use validation::ConfigGuardRailError;
