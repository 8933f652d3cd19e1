//! Negates a sentence and flips its sentiment label

use augment_plugin::{
    Capability, Operation, PluginContext, PluginDescriptor, SentenceAndTargetOperation, TaskType,
    Transformation,
};

use super::split_trailing_punctuation;
use crate::plugin::{ClassRegistration, PackageKind, PackageRegistration};

pub static DESCRIPTOR: PluginDescriptor = PluginDescriptor {
    class_name: "SimpleNegation",
    capability: Capability::SentenceAndTarget,
    tasks: &[TaskType::TextClassification],
    locales: &["en"],
    heavy: false,
};

pub fn registration() -> PackageRegistration {
    PackageRegistration::new("simple_negation", PackageKind::Transformation)
        .with_class(ClassRegistration::transformation(&DESCRIPTOR, build))
}

fn build(_context: &PluginContext) -> anyhow::Result<Transformation> {
    Ok(Transformation::SentenceAndTarget(Box::new(SimpleNegation)))
}

const COPULAS: [&str; 4] = ["is", "are", "was", "were"];

/// Inserts `not` after the first copula and flips `positive`/`negative`.
///
/// Sentences without a copula are returned unchanged together with their label.
pub struct SimpleNegation;

fn flip_label(target: &str) -> String {
    match target {
        "positive" => "negative".to_string(),
        "negative" => "positive".to_string(),
        other => other.to_string(),
    }
}

impl Operation for SimpleNegation {
    fn descriptor(&self) -> &'static PluginDescriptor {
        &DESCRIPTOR
    }
}

impl SentenceAndTargetOperation for SimpleNegation {
    fn generate(&self, sentence: &str, target: &str) -> (String, String) {
        let mut tokens: Vec<&str> = sentence.split(' ').collect();

        let copula = tokens.iter().position(|token| {
            let (word, punctuation) = split_trailing_punctuation(token);
            punctuation.is_empty() && COPULAS.contains(&word.to_lowercase().as_str())
        });

        match copula {
            Some(index) => {
                tokens.insert(index + 1, "not");
                (tokens.join(" "), flip_label(target))
            }
            None => (sentence.to_string(), target.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_first_copula_negated() {
        let (sentence, label) =
            SimpleNegation.generate("The plot is thin but the cast is great", "negative");
        assert_eq!(sentence, "The plot is not thin but the cast is great");
        assert_eq!(label, "positive");
    }

    #[test]
    fn test_sentence_final_copula_is_skipped() {
        let (sentence, label) = SimpleNegation.generate("I know who it is.", "positive");
        assert_eq!(sentence, "I know who it is.");
        assert_eq!(label, "positive");
    }
}
