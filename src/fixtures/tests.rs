//! Fixture loader tests

use super::*;
use tempfile::TempDir;

#[test]
fn test_load_fixtures() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(FIXTURE_FILE_NAME);
    std::fs::write(
        &path,
        r#"{"test_cases": [{"input": "Tset", "output": "Test"}, {"anything": 1}]}"#,
    )
    .unwrap();

    let cases = load_fixtures(&path).unwrap();
    assert_eq!(cases.len(), 2);

    let first: SentenceCase = cases[0].decode().unwrap();
    assert_eq!(first.input, "Tset");
    assert_eq!(first.output, "Test");

    // Shape is not checked at load time
    assert!(cases[1].decode::<SentenceCase>().is_err());
}

#[test]
fn test_missing_fixture_reports_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("no_such_plugin").join(FIXTURE_FILE_NAME);

    let err = load_fixtures(&path).unwrap_err();
    match &err {
        HarnessError::FixtureNotFound { path: reported } => assert_eq!(reported, &path),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains(&path.display().to_string()));
    assert!(err.to_string().contains("add a test file"));
}

#[test]
fn test_document_without_test_cases_is_invalid() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(FIXTURE_FILE_NAME);
    std::fs::write(&path, r#"{"cases": []}"#).unwrap();

    let err = load_fixtures(&path).unwrap_err();
    assert!(matches!(err, HarnessError::InvalidFixture { .. }));
    assert!(err.to_string().contains(&path.display().to_string()));
}

#[test]
fn test_filter_case_defaults_args() {
    let case = TestCase(serde_json::json!({
        "class": "TextContainsNumberFilter",
        "filter_args": {"sentence": "3 apples"},
        "output": true
    }));

    let decoded: FilterTestCase = case.decode().unwrap();
    assert_eq!(decoded.class, "TextContainsNumberFilter");
    assert_eq!(decoded.args, serde_json::json!({}));
    assert!(decoded.output);
}

#[test]
fn test_question_answer_case_shape() {
    let case = TestCase(serde_json::json!({
        "input_c": "Paris is in France.",
        "input_q": "Where is Paris?",
        "input_a": ["France"],
        "output_c": "Paris is in France.",
        "output_q": "Where is Paris?",
        "output_a": ["France"]
    }));

    let decoded: QuestionAnswerCase = case.decode().unwrap();
    assert_eq!(decoded.input_a, vec!["France".to_string()]);
}
