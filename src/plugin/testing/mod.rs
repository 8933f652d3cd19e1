//! Fixture-driven plugin test runner
//!
//! Every fixture is fed to the plugin it belongs to and the produced fields
//! are compared against the expected ones with exact equality. Scopes that
//! match nothing produce [`SkipNotice`]s instead of failures, since plugins
//! are added to a tree incrementally.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

use augment_plugin::{Capability, FilterInput, TaskType, Transformation};
use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::fixtures::{
    ContrastSetCase, QuestionAnswerCase, SentenceAndTargetCase, SentenceCase, TaggingCase,
    TestCase,
};
use crate::plugin::{DiscoveredPlugin, FilterLoader, FilterScope, LoadedFilter, PluginSet};
use crate::HarnessError;


/// Notice that a scope matched no plugin or fixture for an interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipNotice {
    /// Capability interface name
    pub interface: String,

    /// Package id, task type or heaviness scope that was requested
    pub scope: String,
}

impl SkipNotice {
    pub fn new(interface: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
            scope: scope.into(),
        }
    }
}

impl fmt::Display for SkipNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "For {}, no transformation or test case found for {}",
            self.interface, self.scope
        )
    }
}

/// One field whose produced value differs from the fixture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMismatch {
    pub field: String,
    pub expected: serde_json::Value,
    pub actual: serde_json::Value,
}

impl fmt::Display for FieldMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: should have generated {}, got {}",
            self.field, self.expected, self.actual
        )
    }
}

/// Result of a single fixture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginTestResult {
    /// `<package_id>[<fixture index>]`
    pub test_name: String,

    /// Plugin name
    pub plugin: String,

    /// Whether every field matched
    pub passed: bool,

    /// Execution time in milliseconds
    pub execution_time_ms: u64,

    /// Fields that did not match
    pub mismatches: Vec<FieldMismatch>,

    /// Error message (fixture shape or plugin failure)
    pub error: Option<String>,
}

impl PluginTestResult {
    fn errored(test_name: String, plugin: &str, error: String) -> Self {
        Self {
            test_name,
            plugin: plugin.to_string(),
            passed: false,
            execution_time_ms: 0,
            mismatches: Vec::new(),
            error: Some(error),
        }
    }
}

/// Test run summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRunSummary {
    /// Name of the scope that was run
    pub test_suite_name: String,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Total number of fixtures executed
    pub total_tests: usize,

    /// Number of passed fixtures
    pub passed_tests: usize,

    /// Number of failed fixtures
    pub failed_tests: usize,

    /// Interfaces or scopes that had nothing to run
    pub skipped: Vec<SkipNotice>,

    /// Total execution time in milliseconds
    pub total_time_ms: u64,

    /// Individual fixture results
    pub results: Vec<PluginTestResult>,
}

impl TestRunSummary {
    pub fn success(&self) -> bool {
        self.failed_tests == 0
    }

    /// Results that failed
    pub fn failures(&self) -> impl Iterator<Item = &PluginTestResult> {
        self.results.iter().filter(|result| !result.passed)
    }
}

/// What a test run covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestScope {
    /// One named transformation package; lookup and fixture errors are fatal
    Transformation(String),

    /// Every transformation declaring a task type
    Task { task: TaskType, include_heavy: bool },

    /// Every transformation, interface by interface
    Transformations { include_heavy: bool },

    /// Filters in a filter scope
    Filters(FilterScope),
}

impl fmt::Display for TestScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestScope::Transformation(package_id) => write!(f, "{package_id}"),
            TestScope::Task { task, .. } => write!(f, "task:{task}"),
            TestScope::Transformations { include_heavy } => {
                f.write_str(if *include_heavy { "all" } else { "light" })
            }
            TestScope::Filters(scope) => write!(f, "filters:{scope}"),
        }
    }
}

/// Plugin test runner
#[derive(Debug, Clone)]
pub struct PluginTestRunner {
    plugins: PluginSet,
    filters: FilterLoader,
    seed: u64,
}

impl PluginTestRunner {
    /// Create a new plugin test runner
    pub fn new(plugins: PluginSet, filters: FilterLoader, seed: u64) -> Self {
        Self {
            plugins,
            filters,
            seed,
        }
    }

    /// Run every fixture in `scope`
    pub fn run(&self, scope: &TestScope) -> Result<TestRunSummary, HarnessError> {
        let started_at = Utc::now();
        let start_time = Instant::now();
        let mut results = Vec::new();
        let mut skipped = Vec::new();

        info!("Running plugin tests for {}", scope);

        match scope {
            TestScope::Transformation(package_id) => {
                self.run_named(package_id, &mut results, &mut skipped)?;
            }
            TestScope::Task {
                task,
                include_heavy,
            } => {
                self.plugins.registry().require_root()?;
                let plugins = self.plugins.plugins_for_task(*task, *include_heavy)?;
                if plugins.is_empty() {
                    skipped.push(SkipNotice::new("any transformation interface", task.as_str()));
                }
                for plugin in &plugins {
                    self.run_discovered(plugin, &mut results, &mut skipped);
                }
            }
            TestScope::Transformations { include_heavy } => {
                self.plugins.registry().require_root()?;
                for interface in Capability::TRANSFORMATIONS {
                    let plugins = self.plugins.plugins_for_interface(interface, *include_heavy)?;
                    if plugins.is_empty() {
                        skipped.push(SkipNotice::new(interface.interface_name(), scope.to_string()));
                    }
                    for plugin in &plugins {
                        self.run_discovered(plugin, &mut results, &mut skipped);
                    }
                }
            }
            TestScope::Filters(filter_scope) => {
                let runs = self.filters.load_scope(filter_scope)?;
                skipped.extend(runs.skipped);
                results.extend(runs.filters.iter().map(run_filter_case));
                results.extend(runs.failures.into_iter().map(|failure| {
                    let plugin = failure
                        .class_name
                        .clone()
                        .unwrap_or_else(|| failure.package_id.clone());
                    PluginTestResult::errored(failure.test_name(), &plugin, failure.error)
                }));
            }
        }

        for notice in &skipped {
            warn!("{}", notice);
        }

        let passed_tests = results.iter().filter(|r| r.passed).count();
        Ok(TestRunSummary {
            test_suite_name: scope.to_string(),
            started_at,
            total_tests: results.len(),
            passed_tests,
            failed_tests: results.len() - passed_tests,
            skipped,
            total_time_ms: start_time.elapsed().as_millis() as u64,
            results,
        })
    }

    fn run_named(
        &self,
        package_id: &str,
        results: &mut Vec<PluginTestResult>,
        skipped: &mut Vec<SkipNotice>,
    ) -> Result<(), HarnessError> {
        let Some(plugin) = self.plugins.registry().discover_one(package_id, None)? else {
            skipped.push(SkipNotice::new("any transformation interface", package_id));
            return Ok(());
        };

        let cases = plugin.load_fixtures()?;
        let transformation = plugin.instantiate(self.seed)?;
        results.extend(run_transformation_cases(
            &plugin.package_id,
            &transformation,
            &cases,
        ));
        Ok(())
    }

    fn run_discovered(
        &self,
        plugin: &DiscoveredPlugin,
        results: &mut Vec<PluginTestResult>,
        skipped: &mut Vec<SkipNotice>,
    ) {
        let cases = match plugin.load_fixtures() {
            Ok(cases) => cases,
            Err(e @ HarnessError::FixtureNotFound { .. }) => {
                warn!("{}", e);
                skipped.push(SkipNotice::new(
                    plugin.descriptor().capability.interface_name(),
                    plugin.package_id.clone(),
                ));
                return;
            }
            Err(e) => {
                error!("{}", e);
                results.push(PluginTestResult::errored(
                    format!("{}[*]", plugin.package_id),
                    plugin.class.class_name(),
                    e.to_string(),
                ));
                return;
            }
        };

        match plugin.instantiate(self.seed) {
            Ok(transformation) => results.extend(run_transformation_cases(
                &plugin.package_id,
                &transformation,
                &cases,
            )),
            Err(e) => results.push(PluginTestResult::errored(
                format!("{}[*]", plugin.package_id),
                plugin.class.class_name(),
                e.to_string(),
            )),
        }
    }
}

/// Run `cases` against an instantiated transformation
pub fn run_transformation_cases(
    package_id: &str,
    transformation: &Transformation,
    cases: &[TestCase],
) -> Vec<PluginTestResult> {
    cases
        .iter()
        .enumerate()
        .map(|(index, case)| {
            let test_name = format!("{package_id}[{index}]");
            let start_time = Instant::now();

            match check_case(transformation, case) {
                Ok(mismatches) => PluginTestResult {
                    test_name,
                    plugin: transformation.name().to_string(),
                    passed: mismatches.is_empty(),
                    execution_time_ms: start_time.elapsed().as_millis() as u64,
                    mismatches,
                    error: None,
                },
                Err(error) => PluginTestResult::errored(test_name, transformation.name(), error),
            }
        })
        .collect()
}

/// Run one loaded filter against its own fixture
pub fn run_filter_case(loaded: &LoadedFilter) -> PluginTestResult {
    let test_name = format!("{}[{}]", loaded.package_id, loaded.index);
    let start_time = Instant::now();

    let input: FilterInput = match serde_json::from_value(loaded.test_case.filter_args.clone()) {
        Ok(input) => input,
        Err(e) => {
            return PluginTestResult::errored(
                test_name,
                loaded.filter.name(),
                format!("filter_args do not describe a sentence, sentence/target or QA example: {e}"),
            );
        }
    };

    match loaded.filter.filter(&input) {
        Ok(verdict) => {
            let mut mismatches = Vec::new();
            compare_field(&mut mismatches, "output", &loaded.test_case.output, &verdict);
            PluginTestResult {
                test_name,
                plugin: loaded.filter.name().to_string(),
                passed: mismatches.is_empty(),
                execution_time_ms: start_time.elapsed().as_millis() as u64,
                mismatches,
                error: None,
            }
        }
        Err(e) => PluginTestResult::errored(test_name, loaded.filter.name(), format!("{e:#}")),
    }
}

fn check_case(
    transformation: &Transformation,
    case: &TestCase,
) -> Result<Vec<FieldMismatch>, String> {
    let shape_error = |e: serde_json::Error| {
        format!(
            "fixture does not match the {} shape: {}",
            transformation.capability(),
            e
        )
    };
    let mut mismatches = Vec::new();

    match transformation {
        Transformation::Sentence(op) => {
            let case: SentenceCase = case.decode().map_err(shape_error)?;
            let output = op.generate(&case.input);
            compare_field(&mut mismatches, "output", &case.output, &output);
        }
        Transformation::SentenceAndTarget(op) => {
            let case: SentenceAndTargetCase = case.decode().map_err(shape_error)?;
            let (output_x, output_y) = op.generate(&case.input_x, &case.input_y);
            compare_field(&mut mismatches, "output_x", &case.output_x, &output_x);
            compare_field(&mut mismatches, "output_y", &case.output_y, &output_y);
        }
        Transformation::QuestionAnswer(op) => {
            let case: QuestionAnswerCase = case.decode().map_err(shape_error)?;
            let (output_c, output_q, output_a) =
                op.generate(&case.input_c, &case.input_q, &case.input_a);
            compare_field(&mut mismatches, "output_c", &case.output_c, &output_c);
            compare_field(&mut mismatches, "output_q", &case.output_q, &output_q);
            compare_field(&mut mismatches, "output_a", &case.output_a, &output_a);
        }
        Transformation::Tagging(op) => {
            let case: TaggingCase = case.decode().map_err(shape_error)?;
            let (output_sequence, output_tag) =
                op.generate(&case.input_sequence, &case.input_tag);
            compare_field(
                &mut mismatches,
                "output_sequence",
                &case.output_sequence,
                &output_sequence,
            );
            compare_field(&mut mismatches, "output_tag", &case.output_tag, &output_tag);
        }
        Transformation::ContrastSet(op) => {
            let case: ContrastSetCase = case.decode().map_err(shape_error)?;
            let result = op.generate(&case.input);
            compare_field(&mut mismatches, "result", &case.result, &result);
        }
    }

    Ok(mismatches)
}

fn compare_field<T: PartialEq + Serialize>(
    mismatches: &mut Vec<FieldMismatch>,
    field: &str,
    expected: &T,
    actual: &T,
) {
    if expected != actual {
        mismatches.push(FieldMismatch {
            field: field.to_string(),
            expected: serde_json::to_value(expected).unwrap_or(serde_json::Value::Null),
            actual: serde_json::to_value(actual).unwrap_or(serde_json::Value::Null),
        });
    }
}
