//! Configuration management.
//!
//! # Overview
//!
//! Configuration lives in a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `STUDY_INSPECTOR_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`OrthancConfig`] - Orthanc connection, credentials and retries
//! - [`InspectConfig`] - Which instance the `inspect` command reports on
//! - [`ModifyConfig`] - Tag replacements sent by the `modify` command
//! - [`GradingConfig`] - Answer key and comparison settings
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [orthanc]
//! base_url = "http://localhost:8042"
//! username = "orthanc"
//! password = "${ORTHANC_PASSWORD}"
//!
//! [inspect]
//! patient_id = "A034518"
//! series_number = 4
//! instance_number = 130
//! output_path = "study_info.json"
//!
//! [modify]
//! student_id = 12345678
//! patient_id = "3142537564"
//! series_number = 1
//! instance_number = 1
//!
//! [modify.study_replace]
//! AccessionNumber = "EAS5850-{student_id}"
//! StudyInstanceUID = "{derived_study_uid}"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, Environment, GradingConfig, InspectConfig, InspectorConfig, LoggingConfig,
    ModifyConfig, OrthancConfig, RetryConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
