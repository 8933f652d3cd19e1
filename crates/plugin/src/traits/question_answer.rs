//! Question answering capability

use super::Operation;

/// Transforms a (context, question, answers) triple
pub trait QuestionAnswerOperation: Operation {
    fn generate(
        &self,
        context: &str,
        question: &str,
        answers: &[String],
    ) -> (String, String, Vec<String>);
}
