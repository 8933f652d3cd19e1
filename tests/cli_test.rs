//! Integration tests for the `augment-harness` binary

use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;

#[test]
fn test_light_fixtures_pass() {
    let mut command = cargo_bin_cmd!("augment-harness");
    command.arg("test");
    command
        .assert()
        .success()
        .stdout(contains("Test Suite: light"))
        .stdout(contains("Failed: 0"));
}

#[test]
fn test_named_transformation_json_output() {
    let mut command = cargo_bin_cmd!("augment-harness");
    command.args(["test", "--transformation", "simple_negation", "--format", "json"]);
    command
        .assert()
        .success()
        .stdout(contains("\"test_name\": \"simple_negation[0]\""))
        .stdout(contains("\"passed_tests\": 2"));
}

#[test]
fn test_misspelled_transformation_fails() {
    let mut command = cargo_bin_cmd!("augment-harness");
    command.args(["test", "--transformation", "butter_finger_perturbation"]);
    command
        .assert()
        .failure()
        .stderr(contains("butter_finger_perturbation"))
        .stderr(contains("check the spelling"));
}

#[test]
fn test_filter_scope() {
    let mut command = cargo_bin_cmd!("augment-harness");
    command.args(["test", "--filters", "keywords"]);
    command
        .assert()
        .success()
        .stdout(contains("PASS keywords[2] TextContainsKeywordsFilter"));
}

#[test]
fn test_list_light_and_all() {
    let mut light = cargo_bin_cmd!("augment-harness");
    light.arg("list");
    light
        .assert()
        .success()
        .stdout(contains("butter_fingers_perturbation"))
        .stdout(contains("gender_culture_diverse_name").not());

    let mut all = cargo_bin_cmd!("augment-harness");
    all.args(["list", "--all"]);
    all.assert()
        .success()
        .stdout(contains("gender_culture_diverse_name"));
}

#[test]
fn test_list_by_task() {
    let mut command = cargo_bin_cmd!("augment-harness");
    command.args(["list", "--task", "question_answering"]);
    command
        .assert()
        .success()
        .stdout(contains("redundant_context_for_qa"))
        .stdout(contains("numeric_to_word").not());
}

#[test]
fn test_list_filters() {
    let mut command = cargo_bin_cmd!("augment-harness");
    command.args(["list", "--filters"]);
    command
        .assert()
        .success()
        .stdout(contains("keywords").and(contains("length")).and(contains("numeric")));
}

#[test]
fn test_info() {
    let mut command = cargo_bin_cmd!("augment-harness");
    command.args(["info", "numeric_to_word"]);
    command
        .assert()
        .success()
        .stdout(contains("Class: NumericToWord"))
        .stdout(contains("Interface: TaggingOperation"))
        .stdout(contains("Default task: TEXT_TAGGING"))
        .stdout(contains("(2 cases)"));
}

#[test]
fn test_generate() {
    let mut command = cargo_bin_cmd!("augment-harness");
    command.args(["generate", "Don't stop."]);
    command
        .assert()
        .success()
        .stdout(contains("Original: Don't stop."))
        .stdout(contains("ContractionExpansions: Do not stop."));
}

#[test]
fn test_failing_fixture_exits_non_zero() {
    let temp = assert_fs::TempDir::new().unwrap();
    let package = temp.child("transformations").child("contraction_expansions");
    package
        .child("test.json")
        .write_str(r#"{"test_cases": [{"input": "can't", "output": "can't"}]}"#)
        .unwrap();
    let config = temp.child("harness.yaml");
    config
        .write_str(&format!(
            "transformations_dir: {}\n",
            temp.child("transformations").path().display()
        ))
        .unwrap();

    let mut command = cargo_bin_cmd!("augment-harness");
    command.args(["--config"]).arg(config.path()).arg("test");
    command
        .assert()
        .failure()
        .stdout(contains("FAIL contraction_expansions[0]"))
        .stdout(contains("should have generated \"can't\", got \"cannot\""));
}

#[test]
fn test_relative_roots_follow_the_config_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("plugins")
        .child("contraction_expansions")
        .child("test.json")
        .write_str(r#"{"test_cases": [{"input": "can't", "output": "can't"}]}"#)
        .unwrap();
    let config = temp.child("harness.yaml");
    config.write_str("transformations_dir: plugins\n").unwrap();

    let mut command = cargo_bin_cmd!("augment-harness");
    command.args(["--config"]).arg(config.path()).arg("test");
    command
        .assert()
        .failure()
        .stdout(contains("FAIL contraction_expansions[0]"));
}

#[test]
fn test_missing_plugin_root_is_an_error() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config = temp.child("harness.yaml");
    config.write_str("filters_dir: no_such_dir\n").unwrap();

    let mut command = cargo_bin_cmd!("augment-harness");
    command
        .args(["--config"])
        .arg(config.path())
        .args(["test", "--filters", "all"]);
    command
        .assert()
        .failure()
        .stderr(contains("filters_dir"))
        .stdout(contains("Test Suite").not());
}
