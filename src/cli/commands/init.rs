//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "study-inspector.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing study-inspector configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Start Orthanc:");
                println!("     docker run -p 4242:4242 -p 8042:8042 \\");
                println!("       -v \"$(pwd)/orthanc.json:/etc/orthanc/orthanc.json:ro\" \\");
                println!("       jodogne/orthanc:1.12.3");
                println!("  2. Upload the studies at http://localhost:8042/app/explorer.html");
                println!("  3. Create a .env file with your credentials:");
                println!("     - Set ORTHANC_USERNAME and ORTHANC_PASSWORD");
                println!("  4. Edit {} with your student ID", self.output);
                println!("  5. Validate configuration: study-inspector validate-config");
                println!("  6. Run: study-inspector inspect && study-inspector modify");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Generate the sample configuration
    fn generate_config() -> String {
        r#"# study-inspector Configuration File

environment = "development"  # development | staging | production

[application]
log_level = "info"

[orthanc]
base_url = "http://localhost:8042"
username = "${ORTHANC_USERNAME}"
password = "${ORTHANC_PASSWORD}"
tls_verify = true
timeout_seconds = 60

[orthanc.retry]
max_retries = 3
initial_delay_ms = 500
max_delay_ms = 8000
backoff_multiplier = 2.0

# Instance reported by `study-inspector inspect`
[inspect]
patient_id = "A034518"
series_number = 4
instance_number = 130
output_path = "study_info.json"
indent = 2

# Resources modified by `study-inspector modify`
# Values may use {student_id} and {derived_study_uid}
[modify]
student_id = 12345678
patient_id = "3142537564"
series_number = -1
instance_number = 1
keep_source = true
force = true

[modify.patient_replace]
PatientSex = "O"
PatientID = "8675309"

[modify.study_replace]
AccessionNumber = "EAS5850-{student_id}"
StudyInstanceUID = "{derived_study_uid}"
StudyDate = "20221231"
ReferringPhysicianName = "Doctor^Spock"

[modify.series_replace]

[grading]
answer_key_path = "answer_key.json"
case_sensitive = false
numeric_tolerance = 0.0

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"  # daily | hourly | never
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InspectorConfig;
    use tempfile::TempDir;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "study-inspector.toml".to_string(),
            force: false,
        };

        assert_eq!(args.output, "study-inspector.toml");
        assert!(!args.force);
    }

    #[test]
    fn test_generated_config_parses_and_validates() {
        let content = InitArgs::generate_config()
            .replace("${ORTHANC_USERNAME}", "orthanc")
            .replace("${ORTHANC_PASSWORD}", "orthanc");
        let config: InspectorConfig = toml::from_str(&content).unwrap();

        config.validate().unwrap();
        let modify = config.modify.unwrap();
        assert_eq!(modify.student_id.value(), 12345678);
        assert_eq!(modify.study_replace["StudyInstanceUID"], "{derived_study_uid}");
        assert!(modify.series_replace.is_empty());
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("study-inspector.toml");
        std::fs::write(&path, "existing").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().to_string(),
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "existing");

        let args = InitArgs { force: true, ..args };
        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(std::fs::read_to_string(&path)
            .unwrap()
            .contains("[orthanc]"));
    }
}
