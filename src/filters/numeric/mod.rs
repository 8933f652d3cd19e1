//! Keeps examples containing a number

use augment_plugin::{
    Capability, FilterInput, FilterOperation, Operation, PluginContext, PluginDescriptor,
    TaskType,
};
use serde::Deserialize;

use crate::plugin::{ClassRegistration, PackageKind, PackageRegistration};

pub static DESCRIPTOR: PluginDescriptor = PluginDescriptor {
    class_name: "TextContainsNumberFilter",
    capability: Capability::Filter,
    tasks: &[
        TaskType::TextClassification,
        TaskType::TextToTextGeneration,
        TaskType::QuestionAnswering,
    ],
    locales: &[],
    heavy: false,
};

pub fn registration() -> PackageRegistration {
    PackageRegistration::new("numeric", PackageKind::Filter)
        .with_class(ClassRegistration::filter(&DESCRIPTOR, build))
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct NoArgs {}

fn build(
    _context: &PluginContext,
    args: &serde_json::Value,
) -> anyhow::Result<Box<dyn FilterOperation>> {
    NoArgs::deserialize(args)?;
    Ok(Box::new(TextContainsNumberFilter))
}

pub struct TextContainsNumberFilter;

impl Operation for TextContainsNumberFilter {
    fn descriptor(&self) -> &'static PluginDescriptor {
        &DESCRIPTOR
    }
}

impl FilterOperation for TextContainsNumberFilter {
    fn filter(&self, input: &FilterInput) -> anyhow::Result<bool> {
        Ok(input.text().chars().any(|c| c.is_ascii_digit()))
    }
}
