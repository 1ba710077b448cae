//! Integration tests for logging functionality
//!
//! The global subscriber can only be installed once per process, so a single
//! test initializes file logging.

use study_inspector::config::LoggingConfig;
use study_inspector::core::report::save_report;
use study_inspector::domain::InstanceInfo;
use study_inspector::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "logs");
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_invalid_level_is_rejected_before_install() {
    let result = init_logging("verbose", &LoggingConfig::default());
    assert!(result.is_err());
}

#[test]
fn test_file_logging_writes_json_lines() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    let guard = init_logging("info", &config).expect("Failed to initialize logging");
    assert!(log_path.exists());

    let info = InstanceInfo {
        age: None,
        sex: Some("F".to_string()),
        study_description: None,
        modality: Some("CT".to_string()),
        manufacturer: None,
        patient_id: "A034518".to_string(),
        num_series: 1,
        study_instance_uid: "1.2.3".to_string(),
        num_rows: 1,
        num_cols: 1,
        min_pixel_val: 0.0,
        max_pixel_val: 0.0,
        mean_pixel_val: 0.0,
    };
    save_report(&info, temp_dir.path().join("report.json"), 2).unwrap();
    drop(guard);

    let content = std::fs::read_to_string(log_path.join("study-inspector.log")).unwrap();
    let line = content
        .lines()
        .find(|l| l.contains("Report saved"))
        .expect("report event not logged");
    let event: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(event["level"], "INFO");
}
