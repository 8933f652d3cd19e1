//! Filter subsystem: scope selection and fixture-driven filter construction

use std::fmt;
use std::str::FromStr;

use augment_plugin::{Capability, FilterOperation};
use tracing::{debug, error, info, warn};

use crate::fixtures::{FilterTestCase, TestCase};
use crate::plugin::{PluginRegistry, ResolvedPackage, SkipNotice};
use crate::HarnessError;

/// Which filters to load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterScope {
    /// Exactly one filter package, heaviness ignored
    Package(String),

    /// Every filter whose class is not heavy
    Light,

    /// Every filter
    All,
}

impl FilterScope {
    fn includes_heavy(&self) -> bool {
        !matches!(self, FilterScope::Light)
    }
}

impl FromStr for FilterScope {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "light" => FilterScope::Light,
            "all" => FilterScope::All,
            other => FilterScope::Package(other.to_string()),
        })
    }
}

impl fmt::Display for FilterScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterScope::Package(package_id) => f.write_str(package_id),
            FilterScope::Light => f.write_str("light"),
            FilterScope::All => f.write_str("all"),
        }
    }
}

/// A filter instance built for one fixture entry
pub struct LoadedFilter {
    pub package_id: String,

    /// Position of the fixture entry in the package's test file
    pub index: usize,

    pub filter: Box<dyn FilterOperation>,
    pub test_case: FilterTestCase,
}

impl fmt::Debug for LoadedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedFilter")
            .field("package_id", &self.package_id)
            .field("index", &self.index)
            .field("class", &self.test_case.class)
            .field("args", &self.test_case.args)
            .finish()
    }
}

/// A fixture entry, or a whole package, whose filter could not be built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterFailure {
    pub package_id: String,

    /// Fixture entry position, `None` when the test file itself is unusable
    pub index: Option<usize>,

    /// Class named by the fixture entry, if it could be read
    pub class_name: Option<String>,

    pub error: String,
}

impl FilterFailure {
    /// `<package_id>[<index>]`, or `<package_id>[*]` for the whole package
    pub fn test_name(&self) -> String {
        match self.index {
            Some(index) => format!("{}[{}]", self.package_id, index),
            None => format!("{}[*]", self.package_id),
        }
    }
}

/// Filters and their fixtures for one scope
#[derive(Debug, Default)]
pub struct FilterRuns {
    pub filters: Vec<LoadedFilter>,
    pub failures: Vec<FilterFailure>,
    pub skipped: Vec<SkipNotice>,
}

impl FilterRuns {
    fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.failures.is_empty()
    }
}

/// Loads filters from a filter directory tree
#[derive(Debug, Clone)]
pub struct FilterLoader {
    registry: PluginRegistry,
    seed: u64,
}

impl FilterLoader {
    pub fn new(registry: PluginRegistry, seed: u64) -> Self {
        Self { registry, seed }
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Load every filter instance described by the fixtures in `scope`.
    ///
    /// One instance is constructed per fixture entry, with exactly the named
    /// arguments under `args`. A named package fails hard on any lookup,
    /// fixture or construction error. Bulk scopes record a [`FilterFailure`]
    /// per broken entry and keep loading the rest; a package without a test
    /// file becomes a [`SkipNotice`].
    pub fn load_scope(&self, scope: &FilterScope) -> Result<FilterRuns, HarnessError> {
        let mut runs = FilterRuns::default();

        match scope {
            FilterScope::Package(package_id) => {
                let package = self.registry.resolve(package_id)?;
                for (index, case) in package.load_fixtures()?.into_iter().enumerate() {
                    if let Some(loaded) = self.load_case(&package, index, &case, true)? {
                        runs.filters.push(loaded);
                    }
                }
            }
            FilterScope::Light | FilterScope::All => {
                self.registry.require_root()?;
                for package in self.registry.resolve_all()? {
                    self.load_package(&package, scope.includes_heavy(), &mut runs);
                }
            }
        }

        if runs.is_empty() {
            let notice = SkipNotice::new(Capability::Filter.interface_name(), scope.to_string());
            warn!("{}", notice);
            runs.skipped.push(notice);
        }

        info!(
            "Loaded {} filter instances for scope {} ({} failed)",
            runs.filters.len(),
            scope,
            runs.failures.len()
        );
        Ok(runs)
    }

    fn load_package(&self, package: &ResolvedPackage, include_heavy: bool, runs: &mut FilterRuns) {
        let cases = match package.load_fixtures() {
            Ok(cases) => cases,
            Err(e @ HarnessError::FixtureNotFound { .. }) => {
                warn!("{}", e);
                runs.skipped.push(SkipNotice::new(
                    Capability::Filter.interface_name(),
                    package.package_id.clone(),
                ));
                return;
            }
            Err(e) => {
                error!("Filter package {}: {}", package.package_id, e);
                runs.failures.push(FilterFailure {
                    package_id: package.package_id.clone(),
                    index: None,
                    class_name: None,
                    error: e.to_string(),
                });
                return;
            }
        };

        for (index, case) in cases.into_iter().enumerate() {
            let class_name = case
                .0
                .get("class")
                .and_then(|class| class.as_str())
                .map(str::to_string);

            match self.load_case(package, index, &case, include_heavy) {
                Ok(Some(loaded)) => runs.filters.push(loaded),
                Ok(None) => {}
                Err(e) => {
                    error!("Filter fixture {}[{}]: {}", package.package_id, index, e);
                    runs.failures.push(FilterFailure {
                        package_id: package.package_id.clone(),
                        index: Some(index),
                        class_name,
                        error: e.to_string(),
                    });
                }
            }
        }
    }

    /// Build the filter for one fixture entry, `None` for a heavy class in a light scope
    fn load_case(
        &self,
        package: &ResolvedPackage,
        index: usize,
        case: &TestCase,
        include_heavy: bool,
    ) -> Result<Option<LoadedFilter>, HarnessError> {
        let fixture_path = package.fixture_path();
        let test_case: FilterTestCase =
            case.decode()
                .map_err(|source| HarnessError::InvalidFixture {
                    path: fixture_path.clone(),
                    source,
                })?;

        let class = package.registration.class(&test_case.class).ok_or_else(|| {
            HarnessError::FilterClassNotFound {
                package_id: package.package_id.clone(),
                class_name: test_case.class.clone(),
                fixture_path,
            }
        })?;

        // Class-level check, nothing is constructed for heavy filters
        if !include_heavy && class.descriptor.is_heavy() {
            debug!("Skipping heavy filter {}", class.class_name());
            return Ok(None);
        }

        let filter = class.instantiate_filter(&package.context(self.seed), &test_case.args)?;
        Ok(Some(LoadedFilter {
            package_id: package.package_id.clone(),
            index,
            filter,
            test_case,
        }))
    }
}
