//! Token tagging capability

use super::Operation;

/// Transforms a token sequence and its aligned tag sequence.
///
/// Implementations must return sequences of equal length.
pub trait TaggingOperation: Operation {
    fn generate(&self, tokens: &[String], tags: &[String]) -> (Vec<String>, Vec<String>);
}
