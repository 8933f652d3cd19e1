//! Spells out single digits in tagged token sequences

use augment_plugin::{
    Capability, Operation, PluginContext, PluginDescriptor, TaggingOperation, TaskType,
    Transformation,
};

use crate::plugin::{ClassRegistration, PackageKind, PackageRegistration};

pub static DESCRIPTOR: PluginDescriptor = PluginDescriptor {
    class_name: "NumericToWord",
    capability: Capability::Tagging,
    tasks: &[TaskType::TextTagging],
    locales: &["en"],
    heavy: false,
};

pub fn registration() -> PackageRegistration {
    PackageRegistration::new("numeric_to_word", PackageKind::Transformation)
        .with_class(ClassRegistration::transformation(&DESCRIPTOR, build))
}

fn build(_context: &PluginContext) -> anyhow::Result<Transformation> {
    Ok(Transformation::Tagging(Box::new(NumericToWord)))
}

const DIGITS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// Replaces tokens that are a single ASCII digit; tags keep their alignment
pub struct NumericToWord;

impl Operation for NumericToWord {
    fn descriptor(&self) -> &'static PluginDescriptor {
        &DESCRIPTOR
    }
}

impl TaggingOperation for NumericToWord {
    fn generate(&self, tokens: &[String], tags: &[String]) -> (Vec<String>, Vec<String>) {
        let tokens = tokens
            .iter()
            .map(|token| match token.as_bytes() {
                [digit @ b'0'..=b'9'] => DIGITS[(digit - b'0') as usize].to_string(),
                _ => token.clone(),
            })
            .collect();
        (tokens, tags.to_vec())
    }
}
