//! Repeats the context of a question answering example

use augment_plugin::{
    Capability, Operation, PluginContext, PluginDescriptor, QuestionAnswerOperation, TaskType,
    Transformation,
};

use crate::plugin::{ClassRegistration, PackageKind, PackageRegistration};

pub static DESCRIPTOR: PluginDescriptor = PluginDescriptor {
    class_name: "RedundantContextForQa",
    capability: Capability::QuestionAnswer,
    tasks: &[TaskType::QuestionAnswering, TaskType::QuestionGeneration],
    locales: &["en"],
    heavy: false,
};

pub fn registration() -> PackageRegistration {
    PackageRegistration::new("redundant_context_for_qa", PackageKind::Transformation)
        .with_class(ClassRegistration::transformation(&DESCRIPTOR, build))
}

fn build(_context: &PluginContext) -> anyhow::Result<Transformation> {
    Ok(Transformation::QuestionAnswer(Box::new(RedundantContextForQa)))
}

/// Doubles the context; the question and answers are unchanged, so extractive
/// answers remain valid spans
pub struct RedundantContextForQa;

impl Operation for RedundantContextForQa {
    fn descriptor(&self) -> &'static PluginDescriptor {
        &DESCRIPTOR
    }
}

impl QuestionAnswerOperation for RedundantContextForQa {
    fn generate(
        &self,
        context: &str,
        question: &str,
        answers: &[String],
    ) -> (String, String, Vec<String>) {
        let context = if context.is_empty() {
            String::new()
        } else {
            format!("{context} {context}")
        };
        (context, question.to_string(), answers.to_vec())
    }
}
