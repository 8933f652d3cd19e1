//! Gendered word swaps as a contrast set

use std::collections::BTreeMap;

use augment_plugin::{
    Capability, ContrastSetOperation, Operation, PluginContext, PluginDescriptor, TaskType,
    Transformation,
};

use super::{match_case, split_trailing_punctuation};
use crate::plugin::{ClassRegistration, PackageKind, PackageRegistration};

pub static DESCRIPTOR: PluginDescriptor = PluginDescriptor {
    class_name: "PronounSwapContrast",
    capability: Capability::ContrastSet,
    tasks: &[TaskType::TextClassification, TaskType::TextToTextGeneration],
    locales: &["en"],
    heavy: false,
};

pub fn registration() -> PackageRegistration {
    PackageRegistration::new("pronoun_swap_contrast", PackageKind::Transformation)
        .with_class(ClassRegistration::transformation(&DESCRIPTOR, build))
}

fn build(_context: &PluginContext) -> anyhow::Result<Transformation> {
    Ok(Transformation::ContrastSet(Box::new(PronounSwapContrast)))
}

/// Builds a minimal-pair contrast for each sentence by swapping gendered words.
/// Sentences with nothing to swap have no contrast and are left out.
pub struct PronounSwapContrast;

fn counterpart(word: &str) -> Option<&'static str> {
    Some(match word {
        "he" => "she",
        "she" => "he",
        "him" | "his" => "her",
        "her" => "his",
        "himself" => "herself",
        "herself" => "himself",
        "man" => "woman",
        "woman" => "man",
        "men" => "women",
        "women" => "men",
        "boy" => "girl",
        "girl" => "boy",
        _ => return None,
    })
}

fn swap(sentence: &str) -> Option<String> {
    let mut changed = false;
    let swapped = sentence
        .split(' ')
        .map(|token| {
            let (word, punctuation) = split_trailing_punctuation(token);
            match counterpart(&word.to_lowercase()) {
                Some(replacement) => {
                    changed = true;
                    format!("{}{}", match_case(word, replacement), punctuation)
                }
                None => token.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    changed.then_some(swapped)
}

impl Operation for PronounSwapContrast {
    fn descriptor(&self) -> &'static PluginDescriptor {
        &DESCRIPTOR
    }
}

impl ContrastSetOperation for PronounSwapContrast {
    fn generate(&self, sentences: &[String]) -> BTreeMap<String, String> {
        sentences
            .iter()
            .filter_map(|sentence| swap(sentence).map(|contrast| (sentence.clone(), contrast)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentences_without_gendered_words_are_omitted() {
        let result = PronounSwapContrast.generate(&["It rained.".to_string()]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_possessive_her_maps_to_his() {
        assert_eq!(
            swap("Her book helped him.").as_deref(),
            Some("His book helped her.")
        );
    }
}
