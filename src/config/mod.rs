//! Configuration management for the augmentation harness

pub mod config;


// Re-export main types for convenience
pub use config::{HarnessConfig, DEFAULT_CONFIG_FILES};
