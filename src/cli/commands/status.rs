//! Status command implementation
//!
//! This module implements the `status` command for checking connectivity to
//! the configured Orthanc server.

use super::{client_or_exit_code, load_or_exit_code};
use crate::adapters::orthanc::OrthancApi;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking Orthanc status");

        println!("📊 Orthanc Status");
        println!();

        let config = match load_or_exit_code(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let client = match client_or_exit_code(&config.orthanc) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let system = match client.system().await {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to reach Orthanc at {}", client.base_url());
                println!("   Error: {e}");
                return Ok(e.exit_code());
            }
        };

        let or_unknown = |v: Option<String>| v.unwrap_or_else(|| "unknown".to_string());

        println!("✅ Connected to {}", client.base_url());
        println!("  Name: {}", system.name);
        println!("  Version: {}", system.version);
        println!(
            "  API Version: {}",
            or_unknown(system.api_version.map(|v| v.to_string()))
        );
        println!("  DICOM AET: {}", or_unknown(system.dicom_aet));
        println!(
            "  DICOM Port: {}",
            or_unknown(system.dicom_port.map(|p| p.to_string()))
        );
        println!(
            "  HTTP Port: {}",
            or_unknown(system.http_port.map(|p| p.to_string()))
        );
        println!(
            "  Authenticated: {}",
            if client.has_credentials() { "yes" } else { "no" }
        );
        println!();

        Ok(0)
    }
}
