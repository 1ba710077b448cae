//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod grade;
pub mod init;
pub mod inspect;
pub mod modify;
pub mod status;
pub mod validate;

use crate::adapters::orthanc::OrthancClient;
use crate::config::{load_config, InspectorConfig, OrthancConfig};

/// Loads and validates the configuration, printing failures
///
/// Returns the exit code to use when the configuration is unusable.
pub(crate) fn load_or_exit_code(config_path: &str) -> Result<InspectorConfig, i32> {
    load_config(config_path).map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        eprintln!("❌ Failed to load configuration file: {config_path}");
        eprintln!("   Error: {e}");
        2
    })
}

/// Builds the Orthanc client, printing failures
pub(crate) fn client_or_exit_code(config: &OrthancConfig) -> Result<OrthancClient, i32> {
    OrthancClient::new(config.clone()).map_err(|e| {
        tracing::error!(error = %e, "Failed to create Orthanc client");
        eprintln!("❌ {e}");
        e.exit_code()
    })
}
