//! Sentence-level capabilities

use super::Operation;

/// Transforms a single sentence
pub trait SentenceOperation: Operation {
    /// Produce the perturbed sentence
    fn generate(&self, sentence: &str) -> String;
}

/// Transforms a sentence together with its target label or reference
pub trait SentenceAndTargetOperation: Operation {
    /// Produce the perturbed sentence and the matching target
    fn generate(&self, sentence: &str, target: &str) -> (String, String);
}
