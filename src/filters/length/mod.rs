//! Keeps examples whose token count satisfies a comparison

use augment_plugin::{
    Capability, FilterInput, FilterOperation, Operation, PluginContext, PluginDescriptor,
    TaskType,
};
use serde::Deserialize;

use crate::plugin::{ClassRegistration, PackageKind, PackageRegistration};

pub static DESCRIPTOR: PluginDescriptor = PluginDescriptor {
    class_name: "TextLengthFilter",
    capability: Capability::Filter,
    tasks: &[TaskType::TextClassification, TaskType::TextToTextGeneration],
    locales: &[],
    heavy: false,
};

pub fn registration() -> PackageRegistration {
    PackageRegistration::new("length", PackageKind::Filter)
        .with_class(ClassRegistration::filter(&DESCRIPTOR, build))
}

/// Comparison applied as `token_count <op> length`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum KeepOp {
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = "==")]
    Equal,
}

impl KeepOp {
    fn keeps(self, count: usize, length: usize) -> bool {
        match self {
            KeepOp::Greater => count > length,
            KeepOp::Less => count < length,
            KeepOp::GreaterOrEqual => count >= length,
            KeepOp::LessOrEqual => count <= length,
            KeepOp::Equal => count == length,
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LengthArgs {
    keep_op: KeepOp,
    length: usize,
}

fn build(
    _context: &PluginContext,
    args: &serde_json::Value,
) -> anyhow::Result<Box<dyn FilterOperation>> {
    let args = LengthArgs::deserialize(args)?;
    Ok(Box::new(TextLengthFilter {
        keep_op: args.keep_op,
        length: args.length,
    }))
}

/// Counts whitespace-separated tokens of the example text
pub struct TextLengthFilter {
    pub keep_op: KeepOp,
    pub length: usize,
}

impl Operation for TextLengthFilter {
    fn descriptor(&self) -> &'static PluginDescriptor {
        &DESCRIPTOR
    }
}

impl FilterOperation for TextLengthFilter {
    fn filter(&self, input: &FilterInput) -> anyhow::Result<bool> {
        let count = input.text().split_whitespace().count();
        Ok(self.keep_op.keeps(count, self.length))
    }
}
