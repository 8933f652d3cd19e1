//! Plugin catalog, discovery, dispatch and testing
//!
//! Plugins are linked in statically: every package registers its classes in a
//! [`PluginCatalog`] at startup. Discovery then walks a plugin directory and
//! resolves each on-disk package against the catalog, so the directory tree
//! and the catalog must agree on package ids and class names.

use std::collections::HashMap;
use std::fmt;

use augment_plugin::{
    Capability, FilterOperation, PluginContext, PluginDescriptor, Transformation,
};

use crate::naming::{is_valid_package_id, to_implementation_name};
use crate::HarnessError;

pub mod dispatch;
pub mod filtering;
pub mod registry;
pub mod testing;

#[cfg(test)]
pub(crate) mod test_support;

pub use dispatch::*;
pub use filtering::*;
pub use registry::*;
pub use testing::*;

/// Builds a transformation instance
pub type TransformationConstructor = fn(&PluginContext) -> anyhow::Result<Transformation>;

/// Builds a filter instance from its named constructor arguments
pub type FilterConstructor =
    fn(&PluginContext, &serde_json::Value) -> anyhow::Result<Box<dyn FilterOperation>>;

/// Constructor of a registered class
#[derive(Clone, Copy)]
pub enum Constructor {
    Transformation(TransformationConstructor),
    Filter(FilterConstructor),
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constructor::Transformation(_) => f.write_str("Constructor::Transformation"),
            Constructor::Filter(_) => f.write_str("Constructor::Filter"),
        }
    }
}

/// A plugin class: its descriptor and how to build it
#[derive(Debug, Clone, Copy)]
pub struct ClassRegistration {
    pub descriptor: &'static PluginDescriptor,
    pub constructor: Constructor,
}

impl ClassRegistration {
    pub fn transformation(
        descriptor: &'static PluginDescriptor,
        constructor: TransformationConstructor,
    ) -> Self {
        Self {
            descriptor,
            constructor: Constructor::Transformation(constructor),
        }
    }

    pub fn filter(descriptor: &'static PluginDescriptor, constructor: FilterConstructor) -> Self {
        Self {
            descriptor,
            constructor: Constructor::Filter(constructor),
        }
    }

    pub fn class_name(&self) -> &'static str {
        self.descriptor.class_name
    }

    /// Build a fresh transformation instance
    pub fn instantiate(&self, context: &PluginContext) -> Result<Transformation, HarnessError> {
        match self.constructor {
            Constructor::Transformation(construct) => {
                construct(context).map_err(|source| HarnessError::Instantiation {
                    class_name: self.class_name().to_string(),
                    source,
                })
            }
            Constructor::Filter(_) => Err(HarnessError::Instantiation {
                class_name: self.class_name().to_string(),
                source: anyhow::anyhow!("class is a filter, not a transformation"),
            }),
        }
    }

    /// Build a fresh filter instance configured with `args`
    pub fn instantiate_filter(
        &self,
        context: &PluginContext,
        args: &serde_json::Value,
    ) -> Result<Box<dyn FilterOperation>, HarnessError> {
        match self.constructor {
            Constructor::Filter(construct) => {
                construct(context, args).map_err(|source| HarnessError::Instantiation {
                    class_name: self.class_name().to_string(),
                    source,
                })
            }
            Constructor::Transformation(_) => Err(HarnessError::Instantiation {
                class_name: self.class_name().to_string(),
                source: anyhow::anyhow!("class is a transformation, not a filter"),
            }),
        }
    }
}

/// Kind of plugin package, each kind has its own directory tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageKind {
    Transformation,
    Filter,
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageKind::Transformation => f.write_str("transformation"),
            PackageKind::Filter => f.write_str("filter"),
        }
    }
}

/// Everything a plugin package registers
#[derive(Debug, Clone)]
pub struct PackageRegistration {
    /// On-disk directory name
    pub package_id: &'static str,

    pub kind: PackageKind,

    /// Classes provided by the package
    pub classes: Vec<ClassRegistration>,
}

impl PackageRegistration {
    pub fn new(package_id: &'static str, kind: PackageKind) -> Self {
        Self {
            package_id,
            kind,
            classes: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: ClassRegistration) -> Self {
        self.classes.push(class);
        self
    }

    /// Look up a class by exact name
    pub fn class(&self, class_name: &str) -> Option<&ClassRegistration> {
        self.classes
            .iter()
            .find(|class| class.class_name() == class_name)
    }

    /// The class named after the package, e.g. `BackTranslation` for `back_translation`
    pub fn conventional_class(&self) -> Option<&ClassRegistration> {
        self.class(&to_implementation_name(self.package_id))
    }

    fn validate(&self) -> Result<(), HarnessError> {
        if !is_valid_package_id(self.package_id) {
            return Err(HarnessError::InvalidRegistration {
                package_id: self.package_id.to_string(),
                reason: "package ids are lowercase words joined by '_'".to_string(),
            });
        }

        if self.classes.is_empty() {
            return Err(HarnessError::InvalidRegistration {
                package_id: self.package_id.to_string(),
                reason: "a package must register at least one class".to_string(),
            });
        }

        for class in &self.classes {
            let descriptor = class.descriptor;
            if descriptor.tasks.is_empty() {
                return Err(HarnessError::InvalidRegistration {
                    package_id: self.package_id.to_string(),
                    reason: format!("class '{}' declares no task types", descriptor.class_name),
                });
            }

            let consistent = match (self.kind, class.constructor) {
                (PackageKind::Transformation, Constructor::Transformation(_)) => {
                    descriptor.capability.is_transformation()
                }
                (PackageKind::Filter, Constructor::Filter(_)) => {
                    descriptor.capability == Capability::Filter
                }
                _ => false,
            };
            if !consistent {
                return Err(HarnessError::InvalidRegistration {
                    package_id: self.package_id.to_string(),
                    reason: format!(
                        "class '{}' declares {} which does not fit a {} package",
                        descriptor.class_name, descriptor.capability, self.kind
                    ),
                });
            }
        }

        Ok(())
    }
}

/// Static registry of every linked-in plugin package
#[derive(Debug, Clone, Default)]
pub struct PluginCatalog {
    packages: HashMap<(PackageKind, String), PackageRegistration>,
}

impl PluginCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with every built-in transformation and filter
    pub fn builtin() -> Result<Self, HarnessError> {
        let mut catalog = Self::new();
        crate::transformations::register(&mut catalog)?;
        crate::filters::register(&mut catalog)?;
        Ok(catalog)
    }

    /// Register a package; duplicate ids within a kind are rejected
    pub fn register(&mut self, package: PackageRegistration) -> Result<(), HarnessError> {
        package.validate()?;

        let key = (package.kind, package.package_id.to_string());
        if self.packages.contains_key(&key) {
            return Err(HarnessError::InvalidRegistration {
                package_id: package.package_id.to_string(),
                reason: format!("{} package is already registered", package.kind),
            });
        }

        self.packages.insert(key, package);
        Ok(())
    }

    /// Look up a package registration
    pub fn get(&self, kind: PackageKind, package_id: &str) -> Option<&PackageRegistration> {
        self.packages.get(&(kind, package_id.to_string()))
    }

    /// All registrations of a kind, sorted by package id
    pub fn packages(&self, kind: PackageKind) -> Vec<&PackageRegistration> {
        let mut packages: Vec<_> = self
            .packages
            .values()
            .filter(|package| package.kind == kind)
            .collect();
        packages.sort_by_key(|package| package.package_id);
        packages
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
