//! Augmentation Plugin Harness
//!
//! Discovers text augmentation plugins (transformations and filters) from
//! plugin directory trees, dispatches them by capability and task type, and
//! drives their JSON fixtures.

pub mod cli;
pub mod config;
pub mod filters;
pub mod fixtures;
pub mod naming;
pub mod plugin;
pub mod transformations;

pub use augment_plugin::{
    Capability, FilterInput, PluginContext, PluginDescriptor, TaskType, Transformation,
};
pub use config::HarnessConfig;
pub use fixtures::{load_fixtures, TestCase, FIXTURE_FILE_NAME};
pub use naming::{to_implementation_name, to_package_id};
pub use plugin::{
    FilterLoader, FilterScope, Generations, PackageKind, PluginCatalog, PluginRegistry,
    PluginSet, PluginTestRunner, SkipNotice, TestRunSummary, TestScope,
};

use std::path::PathBuf;
use std::sync::Arc;

/// Main application context tying the configuration to the plugin catalog
#[derive(Debug, Clone)]
pub struct AugmentHarness {
    config: HarnessConfig,
    catalog: Arc<PluginCatalog>,
}

impl AugmentHarness {
    /// Create a harness over the built-in plugin catalog
    pub fn new(config: HarnessConfig) -> Result<Self, HarnessError> {
        Ok(Self::with_catalog(config, PluginCatalog::builtin()?))
    }

    /// Create a harness over a caller-supplied catalog
    pub fn with_catalog(config: HarnessConfig, catalog: PluginCatalog) -> Self {
        Self {
            config,
            catalog: Arc::new(catalog),
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn catalog(&self) -> &PluginCatalog {
        &self.catalog
    }

    /// Registry over the transformation directory
    pub fn transformations(&self) -> PluginRegistry {
        PluginRegistry::new(
            self.catalog.clone(),
            self.config.transformations_path(),
            PackageKind::Transformation,
        )
    }

    /// Registry over the filter directory
    pub fn filters(&self) -> PluginRegistry {
        PluginRegistry::new(
            self.catalog.clone(),
            self.config.filters_path(),
            PackageKind::Filter,
        )
    }

    pub fn plugin_set(&self) -> PluginSet {
        PluginSet::new(self.transformations(), self.config.seed)
    }

    pub fn filter_loader(&self) -> FilterLoader {
        FilterLoader::new(self.filters(), self.config.seed)
    }

    pub fn test_runner(&self) -> PluginTestRunner {
        PluginTestRunner::new(self.plugin_set(), self.filter_loader(), self.config.seed)
    }
}

/// Why a named package could not be resolved
#[derive(thiserror::Error, Debug)]
pub enum LookupFailure {
    #[error("not a valid package id")]
    InvalidName,

    #[error("no such directory ({0})")]
    MissingDirectory(#[source] std::io::Error),

    #[error("not a directory")]
    NotADirectory,

    #[error("no package with this id is registered")]
    Unregistered,
}

/// Application error types
#[derive(thiserror::Error, Debug)]
pub enum HarnessError {
    #[error("Fixture file not found: {path}; add a test file with a `test_cases` list")]
    FixtureNotFound { path: PathBuf },

    #[error("Invalid fixture file {path}: {source}")]
    InvalidFixture {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "Plugin '{package_id}' not found in {root}: {source}; check the spelling of the package id"
    )]
    PluginNotFound {
        package_id: String,
        root: PathBuf,
        #[source]
        source: LookupFailure,
    },

    #[error(
        "The {kind} directory {root} does not exist; set `{kind}s_dir` in the configuration file"
    )]
    PluginRootNotFound { kind: PackageKind, root: PathBuf },

    #[error(
        "Package '{package_id}' in {package_dir} does not register class '{class_name}'; \
         the class must be named after the package (snake_case id to CamelCase)"
    )]
    ImplementationNotFound {
        package_id: String,
        class_name: String,
        package_dir: PathBuf,
    },

    #[error("Filter class '{class_name}' named in {fixture_path} is not registered by package '{package_id}'")]
    FilterClassNotFound {
        package_id: String,
        class_name: String,
        fixture_path: PathBuf,
    },

    #[error("Failed to instantiate {class_name}: {source:#}")]
    Instantiation {
        class_name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Invalid registration for package '{package_id}': {reason}")]
    InvalidRegistration { package_id: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the harness library
pub type HarnessResult<T> = Result<T, HarnessError>;
