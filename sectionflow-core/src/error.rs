use sectionflow_config::ConfigGuardRailError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavigationError {
    #[error("Section index {index} out of range (0..{len})")]
    OutOfRange { index: usize, len: usize },

    #[error("Stage has no sections")]
    NoSections,

    #[error("Duplicate section handle: {0}")]
    DuplicateHandle(u64),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigGuardRailError),
}

pub type Result<T> = std::result::Result<T, NavigationError>;
