//! Capability dispatch over the discovered transformation set

use augment_plugin::{Capability, TaskType, Transformation};
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{info, warn};

use crate::plugin::{DiscoveredPlugin, PluginRegistry};
use crate::HarnessError;

/// Key of the untouched input in [`Generations`]
pub const ORIGINAL_KEY: &str = "Original";

/// Outputs of several sentence transformations for one input, in run order
#[derive(Debug, Clone, PartialEq)]
pub struct Generations {
    pub entries: Vec<(String, String)>,
}

impl Generations {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Serializes as a map that keeps run order
impl Serialize for Generations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, output) in &self.entries {
            map.serialize_entry(name, output)?;
        }
        map.end()
    }
}

/// Queries over the full transformation set of one plugin directory
#[derive(Debug, Clone)]
pub struct PluginSet {
    registry: PluginRegistry,
    seed: u64,
}

impl PluginSet {
    pub fn new(registry: PluginRegistry, seed: u64) -> Self {
        Self { registry, seed }
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Every plugin declaring `task`, instantiated lazily as the iterator
    /// advances.
    ///
    /// Each call rescans the directory and builds new instances, so a model
    /// backed plugin pays its load cost once per call.
    pub fn by_task_type(
        &self,
        task: TaskType,
    ) -> Result<impl Iterator<Item = Result<Transformation, HarnessError>>, HarnessError> {
        let seed = self.seed;
        let matching = self.plugins_for_task(task, true)?;
        if matching.is_empty() {
            warn!("No plugin found for task type {}", task);
        }
        Ok(matching
            .into_iter()
            .map(move |plugin| plugin.instantiate(seed)))
    }

    /// Discovered plugins declaring `task`, without instantiating them
    pub fn plugins_for_task(
        &self,
        task: TaskType,
        include_heavy: bool,
    ) -> Result<Vec<DiscoveredPlugin>, HarnessError> {
        Ok(self
            .registry
            .discover_all(None)?
            .into_iter()
            .filter(|plugin| plugin.descriptor().handles_task(task))
            .filter(|plugin| include_heavy || !plugin.descriptor().is_heavy())
            .collect())
    }

    /// Discovered plugins implementing `interface`
    pub fn plugins_for_interface(
        &self,
        interface: Capability,
        include_heavy: bool,
    ) -> Result<Vec<DiscoveredPlugin>, HarnessError> {
        Ok(self
            .registry
            .discover_all(Some(interface))?
            .into_iter()
            .filter(|plugin| include_heavy || !plugin.descriptor().is_heavy())
            .collect())
    }

    /// Package ids of all plugins, heavy ones only when `include_heavy`
    pub fn all_names(
        &self,
        include_heavy: bool,
    ) -> Result<impl Iterator<Item = String>, HarnessError> {
        let plugins = self.registry.discover_all(None)?;
        Ok(plugins
            .into_iter()
            .filter(move |plugin| include_heavy || !plugin.descriptor().is_heavy())
            .map(|plugin| plugin.package_id))
    }

    /// Run `sentence` through every sentence transformation in scope.
    ///
    /// The first entry is always [`ORIGINAL_KEY`] mapped to the input; the rest
    /// are keyed by plugin name. `locale`, when set, drops plugins that do not
    /// declare it.
    pub fn generate_all(
        &self,
        sentence: &str,
        include_heavy: bool,
        locale: Option<&str>,
    ) -> Result<Generations, HarnessError> {
        info!("Original input: {}", sentence);
        let mut entries = vec![(ORIGINAL_KEY.to_string(), sentence.to_string())];

        for plugin in self.plugins_for_interface(Capability::Sentence, include_heavy)? {
            if let Some(locale) = locale {
                if !plugin.descriptor().supports_locale(locale) {
                    continue;
                }
            }

            let transformation = plugin.instantiate(self.seed)?;
            if let Some(operation) = transformation.as_sentence() {
                let perturbed = operation.generate(sentence);
                info!("Perturbed input from {}: {}", operation.name(), perturbed);
                entries.push((operation.name().to_string(), perturbed));
            }
        }

        Ok(Generations { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use augment_plugin::{Operation, PluginContext, PluginDescriptor, SentenceOperation};

    use crate::plugin::test_support::{test_catalog, PluginTree};
    use crate::plugin::{ClassRegistration, PackageKind, PackageRegistration, PluginCatalog};

    fn plugin_set(tree: &PluginTree, catalog: PluginCatalog) -> PluginSet {
        let registry = PluginRegistry::new(
            Arc::new(catalog),
            tree.transformations_dir(),
            PackageKind::Transformation,
        );
        PluginSet::new(registry, 0)
    }

    #[test]
    fn test_all_names_respects_heaviness() {
        let tree = PluginTree::new();
        let set = plugin_set(&tree, test_catalog());

        let light: Vec<String> = set.all_names(false).unwrap().collect();
        let all: Vec<String> = set.all_names(true).unwrap().collect();

        assert_eq!(light, vec!["character_swap", "qa_echo"]);
        assert_eq!(all, vec!["character_swap", "heavy_upper", "qa_echo"]);
        assert!(light.iter().all(|name| all.contains(name)));
    }

    #[test]
    fn test_by_task_type_filters_on_declared_tasks() {
        let tree = PluginTree::new();
        let set = plugin_set(&tree, test_catalog());

        let names: Vec<String> = set
            .by_task_type(TaskType::TextTagging)
            .unwrap()
            .map(|t| t.unwrap().name().to_string())
            .collect();
        assert_eq!(names, vec!["CharacterSwap"]);

        // Heavy plugins are not excluded by task lookups
        let heavy: Vec<String> = set
            .by_task_type(TaskType::TextToTextGeneration)
            .unwrap()
            .map(|t| t.unwrap().name().to_string())
            .collect();
        assert_eq!(heavy, vec!["HeavyUpper"]);

        assert_eq!(set.by_task_type(TaskType::RdfToRdf).unwrap().count(), 0);
    }

    static COUNTED: PluginDescriptor = PluginDescriptor {
        class_name: "CountedOperation",
        capability: Capability::Sentence,
        tasks: &[TaskType::TableToText],
        locales: &[],
        heavy: false,
    };

    static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

    struct CountedOperation;

    impl Operation for CountedOperation {
        fn descriptor(&self) -> &'static PluginDescriptor {
            &COUNTED
        }
    }

    impl SentenceOperation for CountedOperation {
        fn generate(&self, sentence: &str) -> String {
            sentence.to_string()
        }
    }

    fn build_counted(_context: &PluginContext) -> anyhow::Result<Transformation> {
        CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
        Ok(Transformation::Sentence(Box::new(CountedOperation)))
    }

    #[test]
    fn test_by_task_type_builds_fresh_instances() {
        let tree = PluginTree::new();
        tree.add_transformation("counted_operation", None);
        let mut catalog = PluginCatalog::new();
        catalog
            .register(
                PackageRegistration::new("counted_operation", PackageKind::Transformation)
                    .with_class(ClassRegistration::transformation(&COUNTED, build_counted)),
            )
            .unwrap();
        let set = plugin_set(&tree, catalog);

        let lazy = set.by_task_type(TaskType::TableToText).unwrap();
        assert_eq!(CONSTRUCTIONS.load(Ordering::SeqCst), 0);
        assert_eq!(lazy.count(), 1);
        assert_eq!(set.by_task_type(TaskType::TableToText).unwrap().count(), 1);
        assert_eq!(CONSTRUCTIONS.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_generate_all_starts_with_original() {
        let tree = PluginTree::new();
        let set = plugin_set(&tree, test_catalog());

        let light = set.generate_all("Tset", false, None).unwrap();
        assert_eq!(light.entries[0], (ORIGINAL_KEY.to_string(), "Tset".to_string()));
        assert_eq!(light.get("CharacterSwap"), Some("Test"));
        assert_eq!(light.get("HeavyUpper"), None);

        let all = set.generate_all("Tset", true, None).unwrap();
        assert_eq!(all.get("HeavyUpper"), Some("TSET"));
    }

    #[test]
    fn test_generate_all_locale() {
        let tree = PluginTree::new();
        let set = plugin_set(&tree, test_catalog());

        let german = set.generate_all("abc", true, Some("de")).unwrap();
        assert_eq!(german.entries.len(), 2);
        assert_eq!(german.get("HeavyUpper"), Some("ABC"));
    }

    #[test]
    fn test_generations_serialize_in_run_order() {
        let generations = Generations {
            entries: vec![
                (ORIGINAL_KEY.to_string(), "b".to_string()),
                ("Alpha".to_string(), "a".to_string()),
            ],
        };
        assert_eq!(
            serde_json::to_string(&generations).unwrap(),
            r#"{"Original":"b","Alpha":"a"}"#
        );
    }
}
