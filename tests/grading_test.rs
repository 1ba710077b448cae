//! Grading of report files against the bundled answer key

use std::path::PathBuf;
use study_inspector::core::grading::{
    grade_answers, load_answer_key, load_answers, GradeOutcome, GradingOptions,
};
use study_inspector::core::report::save_report;
use study_inspector::domain::InstanceInfo;
use tempfile::TempDir;

fn answer_key_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("answer_key.json")
}

fn expected_report() -> InstanceInfo {
    InstanceInfo {
        age: None,
        sex: Some("F".to_string()),
        study_description: Some("CT ABD PELVIS(WITH CHEST IMAGES) W IV CON".to_string()),
        modality: Some("CT".to_string()),
        manufacturer: Some("TOSHIBA".to_string()),
        patient_id: "A034518".to_string(),
        num_series: 1,
        study_instance_uid: "1.3.6.1.4.1.14519.5.2.1.99.1071.28052166218470275068707230421869"
            .to_string(),
        num_rows: 512,
        num_cols: 512,
        min_pixel_val: -2048.0,
        max_pixel_val: 1863.0,
        mean_pixel_val: -929.21,
    }
}

#[test]
fn test_answer_key_covers_every_report_field() {
    let key = load_answer_key(answer_key_path()).unwrap();
    let report = serde_json::to_value(expected_report()).unwrap();

    let report_fields: Vec<_> = report.as_object().unwrap().keys().cloned().collect();
    let key_fields: Vec<_> = key.keys().cloned().collect();
    assert_eq!(report_fields.len(), 13);
    for field in &report_fields {
        assert!(key_fields.contains(field), "answer key lacks {field}");
    }
}

#[test]
fn test_saved_report_grades_with_tolerance() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("study_info.json");
    save_report(&expected_report(), &path, 2).unwrap();

    let key = load_answer_key(answer_key_path()).unwrap();
    let answers = load_answers(&path).unwrap().unwrap();

    let exact = grade_answers(&answers, &key, &GradingOptions::default());
    assert_eq!(exact.total, 13);
    assert_eq!(exact.score, 12);
    let mean = exact
        .fields
        .iter()
        .find(|f| f.key == "MeanPixelVal")
        .unwrap();
    assert_eq!(mean.outcome, GradeOutcome::Incorrect);

    let tolerant = grade_answers(
        &answers,
        &key,
        &GradingOptions {
            numeric_tolerance: 0.5,
            ..Default::default()
        },
    );
    assert!(tolerant.is_perfect());
}

#[test]
fn test_lowercase_answers_match_case_insensitively() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("answers.json");
    std::fs::write(&path, r#"{"Sex": "f", "Modality": "ct", "Manufacturer": "toshiba"}"#).unwrap();

    let key = load_answer_key(answer_key_path()).unwrap();
    let answers = load_answers(&path).unwrap().unwrap();

    let report = grade_answers(&answers, &key, &GradingOptions::default());
    assert_eq!(report.score, 3);

    let strict = grade_answers(
        &answers,
        &key,
        &GradingOptions {
            case_sensitive: true,
            ..Default::default()
        },
    );
    assert_eq!(strict.score, 0);
}

#[test]
fn test_invalid_json_is_none_and_missing_file_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(load_answers(&path).unwrap().is_none());
    assert!(load_answers(dir.path().join("absent.json")).is_err());
}

#[test]
fn test_answer_key_must_be_an_object() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("key.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();

    assert!(load_answer_key(&path).is_err());
}
