//! Closed set of instantiated transformation plugins

use std::fmt;

use super::*;
use crate::descriptor::{Capability, PluginDescriptor};

/// An instantiated transformation, tagged by capability
pub enum Transformation {
    Sentence(Box<dyn SentenceOperation>),
    SentenceAndTarget(Box<dyn SentenceAndTargetOperation>),
    QuestionAnswer(Box<dyn QuestionAnswerOperation>),
    Tagging(Box<dyn TaggingOperation>),
    ContrastSet(Box<dyn ContrastSetOperation>),
}

impl Transformation {
    /// Capability of the wrapped plugin
    pub fn capability(&self) -> Capability {
        match self {
            Transformation::Sentence(_) => Capability::Sentence,
            Transformation::SentenceAndTarget(_) => Capability::SentenceAndTarget,
            Transformation::QuestionAnswer(_) => Capability::QuestionAnswer,
            Transformation::Tagging(_) => Capability::Tagging,
            Transformation::ContrastSet(_) => Capability::ContrastSet,
        }
    }

    pub fn descriptor(&self) -> &'static PluginDescriptor {
        match self {
            Transformation::Sentence(op) => op.descriptor(),
            Transformation::SentenceAndTarget(op) => op.descriptor(),
            Transformation::QuestionAnswer(op) => op.descriptor(),
            Transformation::Tagging(op) => op.descriptor(),
            Transformation::ContrastSet(op) => op.descriptor(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Transformation::Sentence(op) => op.name(),
            Transformation::SentenceAndTarget(op) => op.name(),
            Transformation::QuestionAnswer(op) => op.name(),
            Transformation::Tagging(op) => op.name(),
            Transformation::ContrastSet(op) => op.name(),
        }
    }

    /// Borrow as a sentence operation, if that is the capability
    pub fn as_sentence(&self) -> Option<&dyn SentenceOperation> {
        match self {
            Transformation::Sentence(op) => Some(op.as_ref()),
            _ => None,
        }
    }
}

impl fmt::Debug for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transformation")
            .field("name", &self.name())
            .field("capability", &self.capability())
            .finish()
    }
}
