//! Logging and observability
//!
//! Structured logging with configurable levels, console output and optional
//! rotating JSON log files.
//!
//! # Example
//!
//! ```no_run
//! use study_inspector::logging::init_logging;
//! use study_inspector::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of an instance lookup
///
/// # Example
///
/// ```no_run
/// use study_inspector::log_lookup_start;
///
/// log_lookup_start!("A034518", 4, 130);
/// ```
#[macro_export]
macro_rules! log_lookup_start {
    ($patient_id:expr, $series_number:expr, $instance_number:expr) => {
        tracing::info!(
            patient_id = %$patient_id,
            series_number = $series_number,
            instance_number = $instance_number,
            "Locating instance"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use study_inspector::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, 1000u64, "Connection timeout");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $delay_ms:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            delay_ms = $delay_ms,
            reason = %$reason,
            "Retrying Orthanc request"
        );
    };
}
