//! Plugin registry for scanning plugin directories and resolving packages

use std::path::{Path, PathBuf};
use std::sync::Arc;

use augment_plugin::{Capability, PluginContext, PluginDescriptor, Transformation};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::fixtures::{load_fixtures, TestCase, FIXTURE_FILE_NAME};
use crate::naming::{is_valid_package_id, to_implementation_name};
use crate::plugin::{ClassRegistration, PackageKind, PackageRegistration, PluginCatalog};
use crate::{HarnessError, LookupFailure};


/// A package found on disk and resolved against the catalog
#[derive(Debug, Clone)]
pub struct ResolvedPackage {
    pub package_id: String,
    pub package_dir: PathBuf,
    pub registration: PackageRegistration,
}

impl ResolvedPackage {
    pub fn fixture_path(&self) -> PathBuf {
        self.package_dir.join(FIXTURE_FILE_NAME)
    }

    pub fn load_fixtures(&self) -> Result<Vec<TestCase>, HarnessError> {
        load_fixtures(&self.fixture_path())
    }

    pub fn context(&self, seed: u64) -> PluginContext {
        PluginContext::new(&self.package_dir).with_seed(seed)
    }
}

/// A transformation package whose conventional class was found
#[derive(Debug, Clone)]
pub struct DiscoveredPlugin {
    pub package_id: String,
    pub package_dir: PathBuf,
    pub class: ClassRegistration,
}

impl DiscoveredPlugin {
    pub fn descriptor(&self) -> &'static PluginDescriptor {
        self.class.descriptor
    }

    pub fn fixture_path(&self) -> PathBuf {
        self.package_dir.join(FIXTURE_FILE_NAME)
    }

    pub fn load_fixtures(&self) -> Result<Vec<TestCase>, HarnessError> {
        load_fixtures(&self.fixture_path())
    }

    /// Construct a new instance; nothing is cached between calls
    pub fn instantiate(&self, seed: u64) -> Result<Transformation, HarnessError> {
        info!("Loading operation {}", self.class.class_name());
        let context = PluginContext::new(&self.package_dir).with_seed(seed);
        self.class.instantiate(&context)
    }
}

/// Scans one plugin directory tree and resolves packages against the catalog
#[derive(Debug, Clone)]
pub struct PluginRegistry {
    catalog: Arc<PluginCatalog>,
    root: PathBuf,
    kind: PackageKind,
}

impl PluginRegistry {
    /// Create a registry over `root` for packages of `kind`
    pub fn new(catalog: Arc<PluginCatalog>, root: impl Into<PathBuf>, kind: PackageKind) -> Self {
        Self {
            catalog,
            root: root.into(),
            kind,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn kind(&self) -> PackageKind {
        self.kind
    }

    /// Fail unless the root is an existing directory.
    ///
    /// Bulk runs call this first so a misconfigured root cannot pass with
    /// zero fixtures executed.
    pub fn require_root(&self) -> Result<(), HarnessError> {
        if self.root.is_dir() {
            return Ok(());
        }
        error!("Plugin directory does not exist: {}", self.root.display());
        Err(HarnessError::PluginRootNotFound {
            kind: self.kind,
            root: self.root.clone(),
        })
    }

    pub fn catalog(&self) -> &PluginCatalog {
        &self.catalog
    }

    /// Package ids of the direct subdirectories of the root, sorted.
    ///
    /// Directories whose names are not valid package ids (`__pycache__`,
    /// `.git`, `CamelCase`) are ignored. A missing root yields no packages.
    pub fn package_ids(&self) -> Result<Vec<String>, HarnessError> {
        if !self.root.exists() {
            error!("Plugin directory does not exist: {}", self.root.display());
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| HarnessError::Io(e.into()))?;
            if !entry.file_type().is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            if is_valid_package_id(name) {
                ids.push(name.to_string());
            } else {
                debug!("Ignoring non-package directory: {}", entry.path().display());
            }
        }

        ids.sort();
        Ok(ids)
    }

    /// Resolve a named package, failing hard when it cannot be found
    pub fn resolve(&self, package_id: &str) -> Result<ResolvedPackage, HarnessError> {
        let package_dir = self.root.join(package_id);
        let not_found = |source| HarnessError::PluginNotFound {
            package_id: package_id.to_string(),
            root: self.root.clone(),
            source,
        };

        if !is_valid_package_id(package_id) {
            return Err(not_found(LookupFailure::InvalidName));
        }

        let metadata = std::fs::metadata(&package_dir)
            .map_err(|e| not_found(LookupFailure::MissingDirectory(e)))?;
        if !metadata.is_dir() {
            return Err(not_found(LookupFailure::NotADirectory));
        }

        let registration = self
            .catalog
            .get(self.kind, package_id)
            .ok_or_else(|| not_found(LookupFailure::Unregistered))?;

        Ok(ResolvedPackage {
            package_id: package_id.to_string(),
            package_dir,
            registration: registration.clone(),
        })
    }

    /// Discover a single named transformation package.
    ///
    /// Lookup failures are errors. `Ok(None)` means the package exists but its
    /// class does not implement `interface`.
    pub fn discover_one(
        &self,
        package_id: &str,
        interface: Option<Capability>,
    ) -> Result<Option<DiscoveredPlugin>, HarnessError> {
        let resolved = self.resolve(package_id)?;
        let class_name = to_implementation_name(package_id);

        let class = *resolved.registration.class(&class_name).ok_or_else(|| {
            HarnessError::ImplementationNotFound {
                package_id: package_id.to_string(),
                class_name: class_name.clone(),
                package_dir: resolved.package_dir.clone(),
            }
        })?;

        if let Some(interface) = interface {
            if class.descriptor.capability != interface {
                debug!(
                    "{} implements {}, not {}",
                    class_name, class.descriptor.capability, interface
                );
                return Ok(None);
            }
        }

        Ok(Some(DiscoveredPlugin {
            package_id: resolved.package_id,
            package_dir: resolved.package_dir,
            class,
        }))
    }

    /// Discover every transformation package under the root.
    ///
    /// Packages that cannot be resolved, or whose class does not implement
    /// `interface`, are skipped; the scan itself only fails on I/O errors
    /// while listing the root.
    pub fn discover_all(
        &self,
        interface: Option<Capability>,
    ) -> Result<Vec<DiscoveredPlugin>, HarnessError> {
        info!("Scanning plugin directory: {}", self.root.display());

        let mut discovered = Vec::new();
        for package_id in self.package_ids()? {
            match self.discover_one(&package_id, interface) {
                Ok(Some(plugin)) => discovered.push(plugin),
                Ok(None) => {}
                Err(e) => warn!("Skipping package {}: {}", package_id, e),
            }
        }

        info!(
            "Discovered {} {} plugins in {}",
            discovered.len(),
            self.kind,
            self.root.display()
        );
        Ok(discovered)
    }

    /// Resolve every package under the root, skipping those that fail
    pub fn resolve_all(&self) -> Result<Vec<ResolvedPackage>, HarnessError> {
        let mut resolved = Vec::new();
        for package_id in self.package_ids()? {
            match self.resolve(&package_id) {
                Ok(package) => resolved.push(package),
                Err(e) => warn!("Skipping package {}: {}", package_id, e),
            }
        }
        Ok(resolved)
    }
}
