//! Replaces first names with names from other cultures

use std::collections::{BTreeMap, HashMap};

use anyhow::Context;
use augment_plugin::{
    Capability, Operation, PluginContext, PluginDescriptor, SentenceOperation, TaskType,
    Transformation,
};
use serde::Deserialize;
use tracing::debug;

use super::split_trailing_punctuation;
use crate::plugin::{ClassRegistration, PackageKind, PackageRegistration};

pub static DESCRIPTOR: PluginDescriptor = PluginDescriptor {
    class_name: "GenderCultureDiverseName",
    capability: Capability::Sentence,
    tasks: &[TaskType::TextClassification, TaskType::TextToTextGeneration],
    locales: &["en"],
    heavy: true,
};

/// Name dictionary bundled with the package
pub const DATA_FILE: &str = "data.json";

pub fn registration() -> PackageRegistration {
    PackageRegistration::new("gender_culture_diverse_name", PackageKind::Transformation)
        .with_class(ClassRegistration::transformation(&DESCRIPTOR, build))
}

fn build(context: &PluginContext) -> anyhow::Result<Transformation> {
    let path = context.data_file(DATA_FILE);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read name dictionary {}", path.display()))?;
    let names: NameDictionary = serde_json::from_str(&content)
        .with_context(|| format!("invalid name dictionary {}", path.display()))?;
    Ok(Transformation::Sentence(Box::new(
        GenderCultureDiverseName::new(&names, context.seed),
    )))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenderedNames {
    #[serde(rename = "M")]
    pub male: Vec<String>,

    #[serde(rename = "F")]
    pub female: Vec<String>,
}

/// Country to gendered first names
pub type NameDictionary = BTreeMap<String, GenderedNames>;

/// Swaps each known first name for another name of the same gender.
///
/// Names of one gender are pooled across countries in dictionary order and a
/// name is replaced by the one `seed + 1` places after it, so the output
/// usually crosses cultures. Lower-case occurrences stay lower-case.
pub struct GenderCultureDiverseName {
    replacements: HashMap<String, String>,
}

impl GenderCultureDiverseName {
    pub fn new(names: &NameDictionary, seed: u64) -> Self {
        let mut replacements = HashMap::new();
        let pools = [
            names.values().flat_map(|n| n.male.iter()).collect::<Vec<_>>(),
            names.values().flat_map(|n| n.female.iter()).collect::<Vec<_>>(),
        ];

        for pool in pools {
            let len = pool.len() as u64;
            for (index, name) in pool.iter().enumerate() {
                let target = pool[((index as u64 + 1 + seed) % len) as usize];
                // First gender listed wins for ambiguous names
                replacements
                    .entry((*name).clone())
                    .or_insert_with(|| target.clone());
            }
        }

        debug!("Loaded {} names", replacements.len());
        Self { replacements }
    }

    fn replace(&self, word: &str) -> Option<String> {
        let mut chars = word.chars();
        let first = chars.next()?;
        let capitalised: String = first.to_uppercase().chain(chars).collect();
        let replacement = self.replacements.get(&capitalised)?;
        Some(if first.is_uppercase() {
            replacement.clone()
        } else {
            replacement.to_lowercase()
        })
    }
}

impl Operation for GenderCultureDiverseName {
    fn descriptor(&self) -> &'static PluginDescriptor {
        &DESCRIPTOR
    }
}

impl SentenceOperation for GenderCultureDiverseName {
    fn generate(&self, sentence: &str) -> String {
        sentence
            .split(' ')
            .map(|token| {
                let (word, punctuation) = split_trailing_punctuation(token);
                match self.replace(word) {
                    Some(name) => format!("{name}{punctuation}"),
                    None => token.to_string(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> NameDictionary {
        serde_json::from_str(include_str!("data.json")).unwrap()
    }

    #[test]
    fn test_seed_shifts_replacement() {
        let op = GenderCultureDiverseName::new(&dictionary(), 1);
        assert_eq!(op.generate("John met Mary."), "Arjun met Priya.");
    }

    #[test]
    fn test_lowercase_names_stay_lowercase() {
        let op = GenderCultureDiverseName::new(&dictionary(), 0);
        assert_eq!(op.generate("ask john"), "ask michael");
    }

    #[test]
    fn test_missing_dictionary_fails_construction() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let err = build(&PluginContext::new(temp_dir.path())).unwrap_err();
        assert!(err.to_string().contains("data.json"));
    }
}
