//! Keeps examples mentioning any of a set of keywords

use std::collections::HashSet;

use augment_plugin::{
    Capability, FilterInput, FilterOperation, Operation, PluginContext, PluginDescriptor,
    TaskType,
};
use serde::Deserialize;

use crate::plugin::{ClassRegistration, PackageKind, PackageRegistration};
use crate::transformations::split_trailing_punctuation;

pub static DESCRIPTOR: PluginDescriptor = PluginDescriptor {
    class_name: "TextContainsKeywordsFilter",
    capability: Capability::Filter,
    tasks: &[
        TaskType::TextClassification,
        TaskType::TextToTextGeneration,
        TaskType::QuestionAnswering,
    ],
    locales: &["en"],
    heavy: false,
};

pub fn registration() -> PackageRegistration {
    PackageRegistration::new("keywords", PackageKind::Filter)
        .with_class(ClassRegistration::filter(&DESCRIPTOR, build))
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct KeywordArgs {
    keywords: Vec<String>,
}

fn build(
    _context: &PluginContext,
    args: &serde_json::Value,
) -> anyhow::Result<Box<dyn FilterOperation>> {
    let args = KeywordArgs::deserialize(args)?;
    if args.keywords.is_empty() {
        anyhow::bail!("at least one keyword is required");
    }
    Ok(Box::new(TextContainsKeywordsFilter::new(args.keywords)))
}

/// Whole-word, case-insensitive keyword match
pub struct TextContainsKeywordsFilter {
    keywords: HashSet<String>,
}

impl TextContainsKeywordsFilter {
    pub fn new(keywords: impl IntoIterator<Item = String>) -> Self {
        Self {
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }
}

impl Operation for TextContainsKeywordsFilter {
    fn descriptor(&self) -> &'static PluginDescriptor {
        &DESCRIPTOR
    }
}

impl FilterOperation for TextContainsKeywordsFilter {
    fn filter(&self, input: &FilterInput) -> anyhow::Result<bool> {
        Ok(input.text().split_whitespace().any(|token| {
            let (word, _) = split_trailing_punctuation(token);
            self.keywords.contains(&word.to_lowercase())
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_words_do_not_match() {
        let filter = TextContainsKeywordsFilter::new(["cat".to_string()]);
        let input = FilterInput::sentence("Concatenate the files");
        assert!(!filter.filter(&input).unwrap());
    }

    #[test]
    fn test_empty_keyword_list_rejected() {
        let context = PluginContext::new(".");
        assert!(build(&context, &serde_json::json!({"keywords": []})).is_err());
    }
}
