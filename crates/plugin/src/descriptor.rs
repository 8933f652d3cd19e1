//! Class-level plugin metadata

use serde::Serialize;
use std::fmt;

use crate::task::TaskType;

/// Capability interface a plugin class implements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Capability {
    /// Sentence in, sentence out
    Sentence,

    /// Sentence and target label in, both out
    SentenceAndTarget,

    /// Context, question and answers in, all three out
    QuestionAnswer,

    /// Token sequence and tag sequence in, both out
    Tagging,

    /// Set of sentences in, map of sentence to contrast sentence out
    ContrastSet,

    /// Predicate over an example
    Filter,
}

impl Capability {
    /// The five transformation capabilities, in the order a bulk run visits them
    pub const TRANSFORMATIONS: [Capability; 5] = [
        Capability::Sentence,
        Capability::SentenceAndTarget,
        Capability::QuestionAnswer,
        Capability::Tagging,
        Capability::ContrastSet,
    ];

    /// Name of the capability interface, as reported in skip notices
    pub fn interface_name(&self) -> &'static str {
        match self {
            Capability::Sentence => "SentenceOperation",
            Capability::SentenceAndTarget => "SentenceAndTargetOperation",
            Capability::QuestionAnswer => "QuestionAnswerOperation",
            Capability::Tagging => "TaggingOperation",
            Capability::ContrastSet => "ContrastSetOperation",
            Capability::Filter => "FilterOperation",
        }
    }

    /// Whether this capability produces transformed examples
    pub fn is_transformation(&self) -> bool {
        !matches!(self, Capability::Filter)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.interface_name())
    }
}

/// Immutable descriptor published by every plugin class.
///
/// Descriptors are `'static` so the harness can classify a class (capability,
/// tasks, heaviness) without constructing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PluginDescriptor {
    /// Class identifier, e.g. `ButterFingersPerturbation`
    pub class_name: &'static str,

    /// Capability interface the class implements
    pub capability: Capability,

    /// Applicable task types, most relevant first
    pub tasks: &'static [TaskType],

    /// Supported locales; empty means locale-independent
    pub locales: &'static [&'static str],

    /// Whether construction is resource intensive (model loads, large data)
    pub heavy: bool,
}

impl PluginDescriptor {
    /// Whether the class declares `task`
    pub fn handles_task(&self, task: TaskType) -> bool {
        self.tasks.contains(&task)
    }

    /// Task used when a caller does not pick one
    pub fn default_task(&self) -> Option<TaskType> {
        self.tasks.first().copied()
    }

    /// Value comparison against the declared locales
    pub fn supports_locale(&self, locale: &str) -> bool {
        self.locales.is_empty()
            || self
                .locales
                .iter()
                .any(|declared| declared.eq_ignore_ascii_case(locale))
    }

    pub fn is_heavy(&self) -> bool {
        self.heavy
    }

    /// Tasks and locales together
    pub fn domain(&self) -> (&'static [TaskType], &'static [&'static str]) {
        (self.tasks, self.locales)
    }
}
