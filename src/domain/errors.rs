//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum InspectorError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Orthanc REST API errors
    #[error("Orthanc error: {0}")]
    Orthanc(#[from] OrthancError),

    /// A requested patient, study, series or instance could not be located
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// DICOM parsing or pixel decoding errors
    #[error("DICOM error: {0}")]
    Dicom(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Grading errors
    #[error("Grading error: {0}")]
    Grading(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl InspectorError {
    /// Process exit code reported by the CLI for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            InspectorError::Configuration(_) | InspectorError::Validation(_) => 2,
            InspectorError::Lookup(_) => 3,
            InspectorError::Orthanc(OrthancError::ResourceNotFound(_)) => 3,
            InspectorError::Orthanc(
                OrthancError::ConnectionFailed(_)
                | OrthancError::Timeout(_)
                | OrthancError::AuthenticationFailed(_)
                | OrthancError::ServerError { .. },
            ) => 4,
            _ => 5,
        }
    }
}

/// Orthanc-specific errors
///
/// Errors that occur when talking to the Orthanc REST API.
/// These errors don't expose the HTTP client's types.
#[derive(Debug, Error)]
pub enum OrthancError {
    /// Failed to connect to the Orthanc server
    #[error("Failed to connect to Orthanc server: {0}")]
    ConnectionFailed(String),

    /// Credentials were rejected (401/403)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The server answered 404 for a resource
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// Invalid response from server
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

impl OrthancError {
    /// Whether retrying the same request may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            OrthancError::ConnectionFailed(_)
                | OrthancError::Timeout(_)
                | OrthancError::ServerError { .. }
        )
    }
}

/// Errors raised while walking patient -> study -> series -> instance
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    /// No patient matched the query
    #[error("No patient found with PatientID '{0}'")]
    PatientNotFound(String),

    /// The patient exists but has no studies
    #[error("Patient '{0}' has no studies")]
    NoStudies(String),

    /// No series in the study carries the requested SeriesNumber
    #[error("No series with SeriesNumber {series_number} in study {study}")]
    SeriesNotFound { study: String, series_number: i64 },

    /// No instance in the series carries the requested InstanceNumber
    #[error("No instance with InstanceNumber {instance_number} in series {series}")]
    InstanceNotFound { series: String, instance_number: i64 },
}

// Conversion from std::io::Error
impl From<std::io::Error> for InspectorError {
    fn from(err: std::io::Error) -> Self {
        InspectorError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for InspectorError {
    fn from(err: serde_json::Error) -> Self {
        InspectorError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for InspectorError {
    fn from(err: toml::de::Error) -> Self {
        InspectorError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspector_error_display() {
        let err = InspectorError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_orthanc_error_conversion() {
        let orthanc_err = OrthancError::ConnectionFailed("Network error".to_string());
        let err: InspectorError = orthanc_err.into();
        assert!(matches!(err, InspectorError::Orthanc(_)));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_lookup_error_conversion() {
        let err: InspectorError = LookupError::PatientNotFound("A034518".to_string()).into();
        assert!(matches!(err, InspectorError::Lookup(_)));
        assert!(err.to_string().contains("A034518"));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_retryable_errors() {
        assert!(OrthancError::Timeout("30s".to_string()).is_retryable());
        assert!(OrthancError::ServerError {
            status: 503,
            message: "busy".to_string()
        }
        .is_retryable());
        assert!(!OrthancError::AuthenticationFailed("bad".to_string()).is_retryable());
        assert!(!OrthancError::ClientError {
            status: 400,
            message: "bad request".to_string()
        }
        .is_retryable());
    }

    #[test]
    fn test_rejected_requests_are_fatal_not_connection_errors() {
        let rejected: InspectorError = OrthancError::ClientError {
            status: 400,
            message: "Modifying StudyInstanceUID requires Force".to_string(),
        }
        .into();
        assert_eq!(rejected.exit_code(), 5);

        let garbled: InspectorError = OrthancError::InvalidResponse("eof".to_string()).into();
        assert_eq!(garbled.exit_code(), 5);

        let busy: InspectorError = OrthancError::ServerError {
            status: 503,
            message: "busy".to_string(),
        }
        .into();
        assert_eq!(busy.exit_code(), 4);
    }

    #[test]
    fn test_not_found_maps_to_lookup_exit_code() {
        let err: InspectorError = OrthancError::ResourceNotFound("/instances/x".to_string()).into();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: InspectorError = io_err.into();
        assert!(matches!(err, InspectorError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: InspectorError = json_err.into();
        assert!(matches!(err, InspectorError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: InspectorError = toml_err.into();
        assert!(matches!(err, InspectorError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }
}
