//! Contrast set capability

use std::collections::BTreeMap;

use super::Operation;

/// Builds contrast sets: minimally edited counterparts of the given examples
pub trait ContrastSetOperation: Operation {
    /// Map every input sentence to its contrast sentence.
    ///
    /// Inputs without a meaningful contrast are omitted from the result.
    fn generate(&self, sentences: &[String]) -> BTreeMap<String, String>;
}
