//! Expands English contractions

use augment_plugin::{
    Capability, Operation, PluginContext, PluginDescriptor, SentenceOperation, TaskType,
    Transformation,
};

use super::{match_case, split_trailing_punctuation};
use crate::plugin::{ClassRegistration, PackageKind, PackageRegistration};

pub static DESCRIPTOR: PluginDescriptor = PluginDescriptor {
    class_name: "ContractionExpansions",
    capability: Capability::Sentence,
    tasks: &[TaskType::TextClassification, TaskType::TextToTextGeneration],
    locales: &["en"],
    heavy: false,
};

pub fn registration() -> PackageRegistration {
    PackageRegistration::new("contraction_expansions", PackageKind::Transformation)
        .with_class(ClassRegistration::transformation(&DESCRIPTOR, build))
}

fn build(_context: &PluginContext) -> anyhow::Result<Transformation> {
    Ok(Transformation::Sentence(Box::new(ContractionExpansions)))
}

const CONTRACTIONS: &[(&str, &str)] = &[
    ("aren't", "are not"),
    ("can't", "cannot"),
    ("couldn't", "could not"),
    ("didn't", "did not"),
    ("doesn't", "does not"),
    ("don't", "do not"),
    ("hadn't", "had not"),
    ("hasn't", "has not"),
    ("haven't", "have not"),
    ("he's", "he is"),
    ("i'd", "I would"),
    ("i'll", "I will"),
    ("i'm", "I am"),
    ("i've", "I have"),
    ("isn't", "is not"),
    ("it's", "it is"),
    ("let's", "let us"),
    ("she's", "she is"),
    ("shouldn't", "should not"),
    ("that's", "that is"),
    ("there's", "there is"),
    ("they're", "they are"),
    ("wasn't", "was not"),
    ("we're", "we are"),
    ("weren't", "were not"),
    ("won't", "will not"),
    ("wouldn't", "would not"),
    ("you're", "you are"),
];

pub struct ContractionExpansions;

fn expand(word: &str) -> Option<&'static str> {
    let lowered = word.to_lowercase().replace('\u{2019}', "'");
    CONTRACTIONS
        .iter()
        .find(|(contraction, _)| *contraction == lowered)
        .map(|(_, expansion)| *expansion)
}

impl Operation for ContractionExpansions {
    fn descriptor(&self) -> &'static PluginDescriptor {
        &DESCRIPTOR
    }
}

impl SentenceOperation for ContractionExpansions {
    fn generate(&self, sentence: &str) -> String {
        sentence
            .split(' ')
            .map(|token| {
                let (word, punctuation) = split_trailing_punctuation(token);
                match expand(word) {
                    Some(expansion) => format!("{}{}", match_case(word, expansion), punctuation),
                    None => token.to_string(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
