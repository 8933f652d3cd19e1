//! Construction context handed to plugin constructors

use std::path::{Path, PathBuf};

/// Plugin construction context
#[derive(Debug, Clone)]
pub struct PluginContext {
    /// Directory of the plugin package (holds bundled data files)
    pub package_dir: PathBuf,

    /// Seed for plugins with a stochastic component
    pub seed: u64,
}

impl PluginContext {
    /// Create a new context with seed 0
    pub fn new(package_dir: impl Into<PathBuf>) -> Self {
        Self {
            package_dir: package_dir.into(),
            seed: 0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Path of a data file bundled next to the implementation module
    pub fn data_file(&self, file_name: impl AsRef<Path>) -> PathBuf {
        self.package_dir.join(file_name)
    }
}
