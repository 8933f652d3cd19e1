//! Main configuration structure and implementation

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::HarnessError;

/// Files looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILES: [&str; 3] = [
    ".augment-harness.yaml",
    ".augment-harness.yml",
    "augment-harness.yaml",
];

const SUPPORTED_VERSION: &str = "1.0";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Configuration version
    pub version: String,

    /// Root of the transformation package tree
    pub transformations_dir: PathBuf,

    /// Root of the filter package tree
    pub filters_dir: PathBuf,

    /// Seed handed to every plugin constructor
    pub seed: u64,

    /// Whether bulk runs include heavy plugins
    pub include_heavy: bool,

    /// Locale used by `generate` when none is given
    pub locale: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        let crate_root = Path::new(env!("CARGO_MANIFEST_DIR"));
        Self {
            version: SUPPORTED_VERSION.to_string(),
            transformations_dir: crate_root.join("src").join("transformations"),
            filters_dir: crate_root.join("src").join("filters"),
            seed: 0,
            include_heavy: false,
            locale: "en".to_string(),
        }
    }
}

impl HarnessConfig {
    /// Load configuration from a YAML file.
    ///
    /// Relative plugin roots are resolved against the directory holding the file.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: HarnessConfig = serde_yaml::from_str(&content).map_err(|e| {
            HarnessError::Config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.transformations_dir = resolve_against(base, &config.transformations_dir);
        config.filters_dir = resolve_against(base, &config.filters_dir);
        Ok(config)
    }

    /// Load `path` if given, else the first default file that exists, else defaults
    pub fn discover(path: Option<&Path>) -> Result<Self, HarnessError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match DEFAULT_CONFIG_FILES
            .iter()
            .map(Path::new)
            .find(|candidate| candidate.exists())
        {
            Some(found) => Self::from_file(found),
            None => Ok(Self::default()),
        }
    }

    /// Save configuration to a YAML file
    pub fn save_to_file(&self, path: &Path) -> Result<(), HarnessError> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| HarnessError::Config(format!("failed to serialize: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.version != SUPPORTED_VERSION {
            return Err(HarnessError::Config(format!(
                "Unsupported configuration version: {}",
                self.version
            )));
        }

        if self.locale.trim().is_empty() {
            return Err(HarnessError::Config("locale must not be empty".to_string()));
        }

        Ok(())
    }

    /// Transformation root with `~` and environment variables expanded
    pub fn transformations_path(&self) -> PathBuf {
        expand_path(&self.transformations_dir)
    }

    /// Filter root with `~` and environment variables expanded
    pub fn filters_path(&self) -> PathBuf {
        expand_path(&self.filters_dir)
    }
}

fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        // Unset variables leave the path as written
        Err(_) => path.to_path_buf(),
    }
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    let expanded = expand_path(path);
    if expanded.is_relative() {
        base.join(expanded)
    } else {
        expanded
    }
}
