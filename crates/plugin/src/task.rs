//! Task types used to scope plugins to downstream NLP tasks

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// NLP task category a plugin is applicable to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    /// Sentence or document classification
    TextClassification,

    /// Sequence-to-sequence generation (summarization, translation)
    TextToTextGeneration,

    /// Token-level tagging (NER, POS)
    TextTagging,

    /// Dialogue act to text generation
    DialogueActToText,

    /// Table to text generation
    TableToText,

    /// RDF triples to text generation
    RdfToText,

    /// RDF triples to RDF triples
    RdfToRdf,

    /// Extractive or abstractive question answering
    QuestionAnswering,

    /// Question generation from a context
    QuestionGeneration,

    /// AMR graph to text generation
    AmrToText,

    /// End-to-end task-oriented dialogue
    E2eTask,
}

impl TaskType {
    /// Every known task type, in declaration order
    pub const ALL: [TaskType; 11] = [
        TaskType::TextClassification,
        TaskType::TextToTextGeneration,
        TaskType::TextTagging,
        TaskType::DialogueActToText,
        TaskType::TableToText,
        TaskType::RdfToText,
        TaskType::RdfToRdf,
        TaskType::QuestionAnswering,
        TaskType::QuestionGeneration,
        TaskType::AmrToText,
        TaskType::E2eTask,
    ];

    /// Canonical upper-case identifier, e.g. `TEXT_CLASSIFICATION`
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::TextClassification => "TEXT_CLASSIFICATION",
            TaskType::TextToTextGeneration => "TEXT_TO_TEXT_GENERATION",
            TaskType::TextTagging => "TEXT_TAGGING",
            TaskType::DialogueActToText => "DIALOGUE_ACT_TO_TEXT",
            TaskType::TableToText => "TABLE_TO_TEXT",
            TaskType::RdfToText => "RDF_TO_TEXT",
            TaskType::RdfToRdf => "RDF_TO_RDF",
            TaskType::QuestionAnswering => "QUESTION_ANSWERING",
            TaskType::QuestionGeneration => "QUESTION_GENERATION",
            TaskType::AmrToText => "AMR_TO_TEXT",
            TaskType::E2eTask => "E2E_TASK",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known task type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTaskTypeError(pub String);

impl fmt::Display for ParseTaskTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<&str> = TaskType::ALL.iter().map(TaskType::as_str).collect();
        write!(
            f,
            "unknown task type '{}', expected one of: {}",
            self.0,
            known.join(", ")
        )
    }
}

impl std::error::Error for ParseTaskTypeError {}

impl FromStr for TaskType {
    type Err = ParseTaskTypeError;

    /// Accepts the canonical form as well as lower-case and kebab-case spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        TaskType::ALL
            .iter()
            .copied()
            .find(|task| task.as_str() == normalized)
            .ok_or_else(|| ParseTaskTypeError(s.to_string()))
    }
}
