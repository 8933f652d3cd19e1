//! Filter capability

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::Operation;

/// `{context, question, answers}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuestionAnswerInput {
    pub context: String,
    pub question: String,
    pub answers: Vec<String>,
}

/// `{sentence, target}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SentenceAndTargetInput {
    pub sentence: String,
    pub target: String,
}

/// `{sentence}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SentenceInput {
    pub sentence: String,
}

/// Example handed to a filter, decoded from a named-argument mapping.
///
/// Variants are tried in declaration order and each shape rejects keys it
/// does not name, so a misspelled argument fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterInput {
    QuestionAnswer(QuestionAnswerInput),
    SentenceAndTarget(SentenceAndTargetInput),
    Sentence(SentenceInput),
}

impl FilterInput {
    pub fn sentence(sentence: impl Into<String>) -> Self {
        FilterInput::Sentence(SentenceInput {
            sentence: sentence.into(),
        })
    }

    /// Primary text of the example: the sentence, or the context for QA
    pub fn text(&self) -> &str {
        match self {
            FilterInput::QuestionAnswer(input) => &input.context,
            FilterInput::SentenceAndTarget(input) => &input.sentence,
            FilterInput::Sentence(input) => &input.sentence,
        }
    }
}

/// Predicate deciding whether an example is kept
pub trait FilterOperation: Operation {
    fn filter(&self, input: &FilterInput) -> Result<bool>;
}
