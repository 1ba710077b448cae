//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the study-inspector configuration file.

use crate::config::{load_config, InspectorConfig};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        for line in summary(&config) {
            println!("{line}");
        }
        println!();
        Ok(0)
    }
}

/// Human readable configuration summary, secrets excluded
fn summary(config: &InspectorConfig) -> Vec<String> {
    let mut lines = vec![
        "Configuration Summary:".to_string(),
        format!("  Environment: {:?}", config.environment),
        format!("  Log Level: {}", config.application.log_level),
        format!("  Orthanc Server: {}", config.orthanc.base_url),
        format!(
            "  Orthanc User: {}",
            config.orthanc.username.as_deref().unwrap_or("(anonymous)")
        ),
        format!("  TLS Verify: {}", config.orthanc.tls_verify),
        format!("  Max Attempts: {}", config.orthanc.retry.max_retries),
    ];

    match &config.inspect {
        Some(inspect) => {
            lines.push(format!(
                "  Inspect: PatientID {} / SeriesNumber {} / InstanceNumber {}",
                inspect.patient_id, inspect.series_number, inspect.instance_number
            ));
            lines.push(format!(
                "  Report Output: {}",
                inspect.output_path.as_deref().unwrap_or("(not saved)")
            ));
        }
        None => lines.push("  Inspect: (not configured)".to_string()),
    }

    match &config.modify {
        Some(modify) => {
            lines.push(format!(
                "  Modify: PatientID {} as student {}",
                modify.patient_id, modify.student_id
            ));
            lines.push(format!(
                "  Replacements: {} patient, {} study, {} series",
                modify.patient_replace.len(),
                modify.study_replace.len(),
                modify.series_replace.len()
            ));
        }
        None => lines.push("  Modify: (not configured)".to_string()),
    }

    lines.push(format!("  Answer Key: {}", config.grading.answer_key_path));
    lines
}
