//! Inspect command implementation
//!
//! This module implements the `inspect` command: locate one instance on the
//! Orthanc server, print its report and save it as JSON.

use super::{client_or_exit_code, load_or_exit_code};
use crate::config::InspectConfig;
use crate::core::{lookup, report};
use clap::Args;

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Override the DICOM PatientID to query
    #[arg(long)]
    pub patient_id: Option<String>,

    /// Override the SeriesNumber to select
    #[arg(long, allow_negative_numbers = true)]
    pub series_number: Option<i64>,

    /// Override the InstanceNumber to select
    #[arg(long, allow_negative_numbers = true)]
    pub instance_number: Option<i64>,

    /// Override the report output path
    #[arg(short, long)]
    pub output: Option<String>,

    /// Print the report without saving it
    #[arg(long)]
    pub no_save: bool,
}

impl InspectArgs {
    /// Merges CLI overrides over the `[inspect]` section
    ///
    /// Without a configured section all of patient ID, series number and
    /// instance number must be given on the command line.
    pub fn resolve(&self, base: Option<&InspectConfig>) -> Result<InspectConfig, String> {
        let patient_id = self
            .patient_id
            .clone()
            .or_else(|| base.map(|b| b.patient_id.clone()))
            .ok_or("patient ID is required: set [inspect].patient_id or pass --patient-id")?;
        let series_number = self
            .series_number
            .or(base.map(|b| b.series_number))
            .ok_or("series number is required: set [inspect].series_number or pass --series-number")?;
        let instance_number = self
            .instance_number
            .or(base.map(|b| b.instance_number))
            .ok_or(
                "instance number is required: set [inspect].instance_number or pass --instance-number",
            )?;

        let output_path = if self.no_save {
            None
        } else {
            self.output
                .clone()
                .or_else(|| base.and_then(|b| b.output_path.clone()))
        };

        Ok(InspectConfig {
            patient_id,
            series_number,
            instance_number,
            output_path,
            indent: base.map(|b| b.indent).unwrap_or(2),
        })
    }

    /// Execute the inspect command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting inspect command");

        let config = match load_or_exit_code(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let inspect = match self.resolve(config.inspect.as_ref()) {
            Ok(i) => i,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        let client = match client_or_exit_code(&config.orthanc) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        println!(
            "🔍 Locating PatientID {} / SeriesNumber {} / InstanceNumber {}",
            inspect.patient_id, inspect.series_number, inspect.instance_number
        );

        let located = match lookup::locate(
            &client,
            &inspect.patient_id,
            inspect.series_number,
            inspect.instance_number,
        )
        .await
        {
            Ok(l) => l,
            Err(e) => {
                tracing::error!(error = %e, "Lookup failed");
                eprintln!("❌ {e}");
                return Ok(e.exit_code());
            }
        };

        let today = chrono::Local::now().date_naive();
        let info = match lookup::build_report(&client, &located, today).await {
            Ok(i) => i,
            Err(e) => {
                tracing::error!(error = %e, "Failed to build report");
                eprintln!("❌ Failed to build report: {e}");
                return Ok(e.exit_code());
            }
        };

        println!();
        println!("{}", report::render_report(&info, inspect.indent)?);
        println!();

        if let Some(ref path) = inspect.output_path {
            report::save_report(&info, path, inspect.indent)?;
            println!("✅ Report saved to {path}");
        }

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> InspectArgs {
        InspectArgs {
            patient_id: None,
            series_number: None,
            instance_number: None,
            output: None,
            no_save: false,
        }
    }

    fn base() -> InspectConfig {
        InspectConfig {
            patient_id: "A034518".to_string(),
            series_number: 4,
            instance_number: 130,
            output_path: Some("study_info.json".to_string()),
            indent: 4,
        }
    }

    #[test]
    fn test_resolve_uses_config() {
        let resolved = args().resolve(Some(&base())).unwrap();
        assert_eq!(resolved.patient_id, "A034518");
        assert_eq!(resolved.series_number, 4);
        assert_eq!(resolved.indent, 4);
        assert_eq!(resolved.output_path.as_deref(), Some("study_info.json"));
    }

    #[test]
    fn test_resolve_cli_overrides() {
        let args = InspectArgs {
            instance_number: Some(1),
            output: Some("out/report.json".to_string()),
            ..args()
        };
        let resolved = args.resolve(Some(&base())).unwrap();
        assert_eq!(resolved.instance_number, 1);
        assert_eq!(resolved.output_path.as_deref(), Some("out/report.json"));
    }

    #[test]
    fn test_resolve_no_save() {
        let args = InspectArgs {
            no_save: true,
            ..args()
        };
        assert!(args.resolve(Some(&base())).unwrap().output_path.is_none());
    }

    #[test]
    fn test_resolve_without_section() {
        assert!(args().resolve(None).is_err());

        let args = InspectArgs {
            patient_id: Some("3142537564".to_string()),
            series_number: Some(-1),
            instance_number: Some(1),
            ..args()
        };
        let resolved = args.resolve(None).unwrap();
        assert_eq!(resolved.series_number, -1);
        assert_eq!(resolved.indent, 2);
        assert!(resolved.output_path.is_none());
    }
}
