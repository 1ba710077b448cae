//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::InspectorConfig;
use super::secret::secret_string;
use crate::domain::errors::InspectorError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Prefix of environment variables that override configuration values
pub const ENV_PREFIX: &str = "STUDY_INSPECTOR";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into InspectorConfig
/// 4. Applies environment variable overrides (STUDY_INSPECTOR_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a configuration error if the file is missing or unreadable, the
/// TOML is malformed, a referenced variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use study_inspector::config::loader::load_config;
///
/// let config = load_config("study-inspector.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<InspectorConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(InspectorError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        InspectorError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: InspectorConfig = toml::from_str(&contents)
        .map_err(|e| InspectorError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        InspectorError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    tracing::debug!(path = %path.display(), "Configuration loaded");

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched. All missing variables are reported
/// together in a single error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| InspectorError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(InspectorError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

fn env_override(section_key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}_{section_key}")).ok()
}

fn parse_override<T: std::str::FromStr>(section_key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        InspectorError::Configuration(format!(
            "Invalid value '{value}' for {ENV_PREFIX}_{section_key}"
        ))
    })
}

/// Applies environment variable overrides using the STUDY_INSPECTOR_* prefix
///
/// Variables follow the pattern `STUDY_INSPECTOR_<SECTION>_<KEY>`, for
/// example `STUDY_INSPECTOR_ORTHANC_BASE_URL`.
fn apply_env_overrides(config: &mut InspectorConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env_override("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Orthanc overrides
    if let Some(val) = env_override("ORTHANC_BASE_URL") {
        config.orthanc.base_url = val;
    }
    if let Some(val) = env_override("ORTHANC_USERNAME") {
        config.orthanc.username = Some(val);
    }
    if let Some(val) = env_override("ORTHANC_PASSWORD") {
        config.orthanc.password = Some(secret_string(val));
    }
    if let Some(val) = env_override("ORTHANC_TLS_VERIFY") {
        config.orthanc.tls_verify = parse_override("ORTHANC_TLS_VERIFY", &val)?;
    }
    if let Some(val) = env_override("ORTHANC_TIMEOUT_SECONDS") {
        config.orthanc.timeout_seconds = parse_override("ORTHANC_TIMEOUT_SECONDS", &val)?;
    }
    if let Some(val) = env_override("ORTHANC_RETRY_MAX_RETRIES") {
        config.orthanc.retry.max_retries = parse_override("ORTHANC_RETRY_MAX_RETRIES", &val)?;
    }

    // Inspect overrides (only if the section is configured)
    if let Some(ref mut inspect) = config.inspect {
        if let Some(val) = env_override("INSPECT_PATIENT_ID") {
            inspect.patient_id = val;
        }
        if let Some(val) = env_override("INSPECT_OUTPUT_PATH") {
            inspect.output_path = Some(val);
        }
    }

    // Modify overrides
    if let Some(ref mut modify) = config.modify {
        if let Some(val) = env_override("MODIFY_STUDENT_ID") {
            modify.student_id = parse_override("MODIFY_STUDENT_ID", &val)?;
        }
        if let Some(val) = env_override("MODIFY_KEEP_SOURCE") {
            modify.keep_source = parse_override("MODIFY_KEEP_SOURCE", &val)?;
        }
    }

    // Grading overrides
    if let Some(val) = env_override("GRADING_ANSWER_KEY_PATH") {
        config.grading.answer_key_path = val;
    }

    // Logging overrides
    if let Some(val) = env_override("LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Some(val) = env_override("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
