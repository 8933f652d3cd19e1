//! Per-plugin test fixtures
//!
//! Every plugin package carries a `test.json` document with a top-level
//! `test_cases` array. The loader only checks that the document exists and
//! has that array; each capability decodes its own case shape when the case
//! is executed.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::HarnessError;

#[cfg(test)]
mod tests;

/// File name of the fixture document inside a plugin package
pub const FIXTURE_FILE_NAME: &str = "test.json";

/// A single, not yet shape-checked, test case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestCase(pub serde_json::Value);

impl TestCase {
    /// Decode this case into the shape a capability expects
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.0)
    }
}

/// Fixture document structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureDocument {
    /// Ordered test cases
    pub test_cases: Vec<TestCase>,
}

/// Load the test cases stored at `path`.
///
/// A missing file yields [`HarnessError::FixtureNotFound`] carrying `path`.
pub fn load_fixtures(path: &Path) -> Result<Vec<TestCase>, HarnessError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(HarnessError::FixtureNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(HarnessError::Io(e)),
    };

    let document: FixtureDocument =
        serde_json::from_str(&content).map_err(|source| HarnessError::InvalidFixture {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(
        "Loaded {} test cases from {}",
        document.test_cases.len(),
        path.display()
    );
    Ok(document.test_cases)
}

/// `input` -> `output`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceCase {
    pub input: String,
    pub output: String,
}

/// `input_x`, `input_y` -> `output_x`, `output_y`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceAndTargetCase {
    pub input_x: String,
    pub input_y: String,
    pub output_x: String,
    pub output_y: String,
}

/// Context, question and answers in and out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionAnswerCase {
    pub input_c: String,
    pub input_q: String,
    pub input_a: Vec<String>,
    pub output_c: String,
    pub output_q: String,
    pub output_a: Vec<String>,
}

/// Token and tag sequences in and out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggingCase {
    pub input_sequence: Vec<String>,
    pub input_tag: Vec<String>,
    pub output_sequence: Vec<String>,
    pub output_tag: Vec<String>,
}

/// Sentences in, expected contrast map out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastSetCase {
    pub input: Vec<String>,
    pub result: BTreeMap<String, String>,
}

/// Filter fixture: which class to build, how, what to feed it and the verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterTestCase {
    /// Concrete filter class name
    pub class: String,

    /// Named constructor arguments
    #[serde(default = "empty_arguments")]
    pub args: serde_json::Value,

    /// Named arguments of the filter invocation
    pub filter_args: serde_json::Value,

    /// Expected verdict
    pub output: bool,
}

fn empty_arguments() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}
