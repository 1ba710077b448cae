//! Configuration schema types
//!
//! This module defines the configuration structure that maps to the TOML file.

use crate::config::SecretString;
use crate::domain::ids::StudentId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectorConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// Orthanc server connection
    pub orthanc: OrthancConfig,

    /// Instance to inspect (required by the `inspect` command)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspect: Option<InspectConfig>,

    /// Modification to send back (required by the `modify` command)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modify: Option<ModifyConfig>,

    /// Grading settings
    #[serde(default)]
    pub grading: GradingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl InspectorConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.orthanc.validate(&self.environment)?;
        if let Some(ref inspect) = self.inspect {
            inspect.validate()?;
        }
        if let Some(ref modify) = self.modify {
            modify.validate()?;
        }
        self.grading.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Returns the `[inspect]` section or a configuration error
    pub fn require_inspect(&self) -> Result<&InspectConfig, String> {
        self.inspect
            .as_ref()
            .ok_or_else(|| "[inspect] section is required for this command".to_string())
    }

    /// Returns the `[modify]` section or a configuration error
    pub fn require_modify(&self) -> Result<&ModifyConfig, String> {
        self.modify
            .as_ref()
            .ok_or_else(|| "[modify] section is required for this command".to_string())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first one
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_retries == 0 || self.max_retries > 10 {
            return Err(format!(
                "orthanc.retry.max_retries must be between 1 and 10, got {}",
                self.max_retries
            ));
        }
        if self.backoff_multiplier < 1.0 {
            return Err(format!(
                "orthanc.retry.backoff_multiplier must be >= 1.0, got {}",
                self.backoff_multiplier
            ));
        }
        if self.initial_delay_ms > self.max_delay_ms {
            return Err(format!(
                "orthanc.retry.initial_delay_ms ({}) cannot exceed max_delay_ms ({})",
                self.initial_delay_ms, self.max_delay_ms
            ));
        }
        Ok(())
    }

    /// Delay before retry number `attempt` (1-based)
    pub fn delay_for_attempt(&self, attempt: usize) -> u64 {
        let exponent = attempt.saturating_sub(1) as i32;
        let delay = self.initial_delay_ms as f64 * self.backoff_multiplier.powi(exponent);
        (delay as u64).min(self.max_delay_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// Orthanc server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrthancConfig {
    /// Base URL of the Orthanc HTTP interface (port 8042 by default)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Username for HTTP basic authentication (optional)
    #[serde(default)]
    pub username: Option<String>,

    /// Password for HTTP basic authentication (optional)
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub password: Option<SecretString>,

    /// TLS certificate verification enabled
    ///
    /// Must stay `true` in production environments (enforced by validation).
    #[serde(default = "default_true")]
    pub tls_verify: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

impl OrthancConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.is_empty() {
            return Err("orthanc.base_url cannot be empty".to_string());
        }

        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| format!("orthanc.base_url is not a valid URL: {e}"))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err("orthanc.base_url must start with http:// or https://".to_string());
        }

        let has_username = self.username.as_ref().is_some_and(|u| !u.is_empty());
        let has_password = self
            .password
            .as_ref()
            .is_some_and(|p| !p.expose_secret().is_empty());
        if has_username != has_password {
            return Err(
                "orthanc.username and orthanc.password must be set together".to_string(),
            );
        }

        if self.timeout_seconds == 0 {
            return Err("orthanc.timeout_seconds must be greater than 0".to_string());
        }

        if *environment == Environment::Production && !self.tls_verify {
            return Err(
                "TLS certificate verification cannot be disabled in production environments. \
                Set 'tls_verify = true', or use environment = \"development\" for local servers."
                    .to_string(),
            );
        }

        self.retry.validate()?;
        Ok(())
    }

    /// Base URL without trailing slashes
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl Default for OrthancConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            username: None,
            password: None,
            tls_verify: true,
            timeout_seconds: default_timeout_seconds(),
            retry: RetryConfig::default(),
        }
    }
}

/// Which instance to report on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectConfig {
    /// DICOM PatientID to query
    pub patient_id: String,

    /// SeriesNumber of the series within the patient's first study
    pub series_number: i64,

    /// InstanceNumber of the instance within the series
    pub instance_number: i64,

    /// Where to save the JSON report (no file is written when absent)
    #[serde(default)]
    pub output_path: Option<String>,

    /// JSON indentation width
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl InspectConfig {
    fn validate(&self) -> Result<(), String> {
        if self.patient_id.trim().is_empty() {
            return Err("inspect.patient_id cannot be empty".to_string());
        }
        if self.indent > 8 {
            return Err(format!(
                "inspect.indent must be between 0 and 8, got {}",
                self.indent
            ));
        }
        Ok(())
    }
}

/// Tag replacements to send back to Orthanc
///
/// Replacement values may reference `{student_id}` and `{derived_study_uid}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifyConfig {
    /// Student identifier used in derived values
    pub student_id: StudentId,

    /// DICOM PatientID of the patient to modify
    pub patient_id: String,

    /// SeriesNumber of the series to modify
    pub series_number: i64,

    /// InstanceNumber used to confirm the located series
    pub instance_number: i64,

    /// Keep the original resources next to the modified copies
    #[serde(default = "default_true")]
    pub keep_source: bool,

    /// Allow modification of identifying tags such as PatientID
    #[serde(default = "default_true")]
    pub force: bool,

    /// Patient-level replacements
    #[serde(default)]
    pub patient_replace: BTreeMap<String, String>,

    /// Study-level replacements
    #[serde(default)]
    pub study_replace: BTreeMap<String, String>,

    /// Series-level replacements
    #[serde(default)]
    pub series_replace: BTreeMap<String, String>,
}

impl ModifyConfig {
    fn validate(&self) -> Result<(), String> {
        if self.patient_id.trim().is_empty() {
            return Err("modify.patient_id cannot be empty".to_string());
        }
        if self.patient_replace.is_empty()
            && self.study_replace.is_empty()
            && self.series_replace.is_empty()
        {
            return Err(
                "modify requires at least one of patient_replace, study_replace or series_replace"
                    .to_string(),
            );
        }
        for (tag, _) in self
            .patient_replace
            .iter()
            .chain(&self.study_replace)
            .chain(&self.series_replace)
        {
            if tag.trim().is_empty() {
                return Err("modify replacement tag names cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

/// Grading settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Path to the answer key JSON file
    #[serde(default = "default_answer_key_path")]
    pub answer_key_path: String,

    /// Compare string values case-sensitively
    #[serde(default)]
    pub case_sensitive: bool,

    /// Absolute tolerance for numeric answers (0 = exact textual match)
    #[serde(default)]
    pub numeric_tolerance: f64,
}

impl GradingConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.numeric_tolerance.is_finite() || self.numeric_tolerance < 0.0 {
            return Err(format!(
                "grading.numeric_tolerance must be a non-negative number, got {}",
                self.numeric_tolerance
            ));
        }
        Ok(())
    }
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            answer_key_path: default_answer_key_path(),
            case_sensitive: false,
            numeric_tolerance: 0.0,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "http://localhost:8042".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    8000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_indent() -> usize {
    2
}

fn default_answer_key_path() -> String {
    "answer_key.json".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
