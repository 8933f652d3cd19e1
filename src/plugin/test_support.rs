//! Test-only plugins and on-disk plugin trees

use std::path::{Path, PathBuf};

use augment_plugin::*;
use serde::Deserialize;
use tempfile::TempDir;

use crate::plugin::{ClassRegistration, PackageKind, PackageRegistration, PluginCatalog};

pub(crate) static CHARACTER_SWAP: PluginDescriptor = PluginDescriptor {
    class_name: "CharacterSwap",
    capability: Capability::Sentence,
    tasks: &[TaskType::TextClassification, TaskType::TextTagging],
    locales: &["en"],
    heavy: false,
};

pub(crate) static HEAVY_UPPER: PluginDescriptor = PluginDescriptor {
    class_name: "HeavyUpper",
    capability: Capability::Sentence,
    tasks: &[TaskType::TextToTextGeneration],
    locales: &["de"],
    heavy: true,
};

pub(crate) static QA_ECHO: PluginDescriptor = PluginDescriptor {
    class_name: "QaEcho",
    capability: Capability::QuestionAnswer,
    tasks: &[TaskType::QuestionAnswering],
    locales: &[],
    heavy: false,
};

pub(crate) static MIN_LENGTH_FILTER: PluginDescriptor = PluginDescriptor {
    class_name: "MinLengthFilter",
    capability: Capability::Filter,
    tasks: &[TaskType::TextClassification],
    locales: &[],
    heavy: false,
};

pub(crate) static MODEL_FILTER: PluginDescriptor = PluginDescriptor {
    class_name: "ModelFilter",
    capability: Capability::Filter,
    tasks: &[TaskType::TextClassification],
    locales: &[],
    heavy: true,
};

/// Swaps the second and third character of every word
pub(crate) struct CharacterSwap;

impl Operation for CharacterSwap {
    fn descriptor(&self) -> &'static PluginDescriptor {
        &CHARACTER_SWAP
    }
}

impl SentenceOperation for CharacterSwap {
    fn generate(&self, sentence: &str) -> String {
        sentence
            .split(' ')
            .map(|word| {
                let mut chars: Vec<char> = word.chars().collect();
                if chars.len() >= 3 {
                    chars.swap(1, 2);
                }
                chars.into_iter().collect::<String>()
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub(crate) struct HeavyUpper;

impl Operation for HeavyUpper {
    fn descriptor(&self) -> &'static PluginDescriptor {
        &HEAVY_UPPER
    }
}

impl SentenceOperation for HeavyUpper {
    fn generate(&self, sentence: &str) -> String {
        sentence.to_uppercase()
    }
}

pub(crate) struct QaEcho;

impl Operation for QaEcho {
    fn descriptor(&self) -> &'static PluginDescriptor {
        &QA_ECHO
    }
}

impl QuestionAnswerOperation for QaEcho {
    fn generate(
        &self,
        context: &str,
        question: &str,
        answers: &[String],
    ) -> (String, String, Vec<String>) {
        (context.to_string(), question.to_string(), answers.to_vec())
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct MinLengthArgs {
    min: usize,
}

pub(crate) struct MinLengthFilter {
    pub min: usize,
}

impl Operation for MinLengthFilter {
    fn descriptor(&self) -> &'static PluginDescriptor {
        &MIN_LENGTH_FILTER
    }
}

impl FilterOperation for MinLengthFilter {
    fn filter(&self, input: &FilterInput) -> anyhow::Result<bool> {
        Ok(input.text().chars().count() >= self.min)
    }
}

pub(crate) struct ModelFilter;

impl Operation for ModelFilter {
    fn descriptor(&self) -> &'static PluginDescriptor {
        &MODEL_FILTER
    }
}

impl FilterOperation for ModelFilter {
    fn filter(&self, _input: &FilterInput) -> anyhow::Result<bool> {
        Ok(true)
    }
}

fn build_character_swap(_context: &PluginContext) -> anyhow::Result<Transformation> {
    Ok(Transformation::Sentence(Box::new(CharacterSwap)))
}

fn build_heavy_upper(_context: &PluginContext) -> anyhow::Result<Transformation> {
    Ok(Transformation::Sentence(Box::new(HeavyUpper)))
}

fn build_qa_echo(_context: &PluginContext) -> anyhow::Result<Transformation> {
    Ok(Transformation::QuestionAnswer(Box::new(QaEcho)))
}

fn build_min_length(
    _context: &PluginContext,
    args: &serde_json::Value,
) -> anyhow::Result<Box<dyn FilterOperation>> {
    let args = MinLengthArgs::deserialize(args)?;
    Ok(Box::new(MinLengthFilter { min: args.min }))
}

fn build_model_filter(
    _context: &PluginContext,
    _args: &serde_json::Value,
) -> anyhow::Result<Box<dyn FilterOperation>> {
    Ok(Box::new(ModelFilter))
}

/// Catalog with one light and one heavy sentence plugin, a QA plugin and two filters
pub(crate) fn test_catalog() -> PluginCatalog {
    let mut catalog = PluginCatalog::new();
    let packages = [
        PackageRegistration::new("character_swap", PackageKind::Transformation).with_class(
            ClassRegistration::transformation(&CHARACTER_SWAP, build_character_swap),
        ),
        PackageRegistration::new("heavy_upper", PackageKind::Transformation)
            .with_class(ClassRegistration::transformation(&HEAVY_UPPER, build_heavy_upper)),
        PackageRegistration::new("qa_echo", PackageKind::Transformation)
            .with_class(ClassRegistration::transformation(&QA_ECHO, build_qa_echo)),
        PackageRegistration::new("length_check", PackageKind::Filter)
            .with_class(ClassRegistration::filter(&MIN_LENGTH_FILTER, build_min_length))
            .with_class(ClassRegistration::filter(&MODEL_FILTER, build_model_filter)),
        PackageRegistration::new("model_check", PackageKind::Filter)
            .with_class(ClassRegistration::filter(&MODEL_FILTER, build_model_filter)),
    ];
    for package in packages {
        catalog
            .register(package)
            .expect("test packages are valid");
    }
    catalog
}

/// Temporary plugin tree matching [`test_catalog`].
///
/// `qa_echo` has no fixture file, `unregistered_plugin` is not in the catalog
/// and `__pycache__` is not a valid package id.
pub(crate) struct PluginTree {
    pub dir: TempDir,
}

impl PluginTree {
    pub fn new() -> Self {
        let tree = Self {
            dir: TempDir::new().expect("temp dir"),
        };

        tree.add_transformation(
            "character_swap",
            Some(
                r#"{"test_cases": [
                    {"input": "Tset", "output": "Test"},
                    {"input": "Hlelo wrold", "output": "Hello world"}
                ]}"#,
            ),
        );
        tree.add_transformation(
            "heavy_upper",
            Some(r#"{"test_cases": [{"input": "abc", "output": "ABC"}]}"#),
        );
        tree.add_transformation("qa_echo", None);
        tree.add_transformation("unregistered_plugin", None);
        tree.add_transformation("__pycache__", None);

        tree.add_filter(
            "length_check",
            r#"{"test_cases": [
                {"class": "MinLengthFilter", "args": {"min": 5}, "filter_args": {"sentence": "short"}, "output": true},
                {"class": "MinLengthFilter", "args": {"min": 50}, "filter_args": {"sentence": "short"}, "output": false},
                {"class": "ModelFilter", "args": {}, "filter_args": {"sentence": "anything"}, "output": true}
            ]}"#,
        );
        tree.add_filter(
            "model_check",
            r#"{"test_cases": [
                {"class": "ModelFilter", "filter_args": {"sentence": "anything"}, "output": true}
            ]}"#,
        );

        tree
    }

    pub fn transformations_dir(&self) -> PathBuf {
        self.dir.path().join("transformations")
    }

    pub fn filters_dir(&self) -> PathBuf {
        self.dir.path().join("filters")
    }

    pub fn add_transformation(&self, package_id: &str, fixtures: Option<&str>) {
        write_package(&self.transformations_dir(), package_id, fixtures);
    }

    pub fn add_filter(&self, package_id: &str, fixtures: &str) {
        write_package(&self.filters_dir(), package_id, Some(fixtures));
    }
}

fn write_package(root: &Path, package_id: &str, fixtures: Option<&str>) {
    let package_dir = root.join(package_id);
    std::fs::create_dir_all(&package_dir).expect("create package dir");
    std::fs::write(package_dir.join("mod.rs"), "").expect("write module");
    if let Some(fixtures) = fixtures {
        std::fs::write(package_dir.join("test.json"), fixtures).expect("write fixtures");
    }
}
