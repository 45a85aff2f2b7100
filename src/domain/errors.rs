//! Domain error types
//!
//! This module defines the error hierarchy for restws. Registry construction
//! failures (conflicts, provider failures) are fatal for the caller that
//! triggered the build; request-time failures are returned to the caller as-is.

use thiserror::Error;

/// Boxed error used as the source of platform failures
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main restws error type
#[derive(Debug, Error)]
pub enum RestError {
    /// No resource is registered under the requested name or domain type
    #[error("Unknown resource: {0}")]
    ResourceNotFound(String),

    /// The requested object does not exist in the data store
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    /// Two components claim the same identity, or a component cannot be created
    #[error("Configuration conflict: {0}")]
    ConfigurationConflict(String),

    /// Configuration file or settings errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The resource does not support what was asked of it
    #[error("{0}")]
    UnsupportedOperation(String),

    /// Current platform version does not satisfy a component's constraint
    #[error("Module version mismatch: {0}")]
    VersionMismatch(String),

    /// A platform collaborator failed (component discovery, data store)
    #[error("{message}")]
    Platform {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Invalid request input
    #[error("Validation error: {0}")]
    Validation(String),

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

impl RestError {
    /// Creates a platform error wrapping an underlying cause
    pub fn platform(
        message: impl Into<String>,
        source: impl Into<BoxedSource>,
    ) -> Self {
        RestError::Platform {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns true for failures that abort registry construction
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RestError::ConfigurationConflict(_)
                | RestError::Configuration(_)
                | RestError::Platform { .. }
        )
    }
}

impl From<std::io::Error> for RestError {
    fn from(err: std::io::Error) -> Self {
        RestError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RestError {
    fn from(err: serde_json::Error) -> Self {
        RestError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for RestError {
    fn from(err: toml::de::Error) -> Self {
        RestError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_resource_not_found_display() {
        let err = RestError::ResourceNotFound("foo".to_string());
        assert_eq!(err.to_string(), "Unknown resource: foo");
    }

    #[test]
    fn test_unsupported_operation_display_is_bare_message() {
        let err = RestError::UnsupportedOperation("The search is ambiguous".to_string());
        assert_eq!(err.to_string(), "The search is ambiguous");
    }

    #[test]
    fn test_platform_error_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err = RestError::platform("Cannot access REST resources", io_err);
        assert_eq!(err.to_string(), "Cannot access REST resources");
        assert_eq!(err.source().map(|s| s.to_string()), Some("disk gone".to_string()));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_request_errors_are_not_fatal() {
        assert!(!RestError::UnsupportedOperation("x".into()).is_fatal());
        assert!(!RestError::ResourceNotFound("x".into()).is_fatal());
        assert!(!RestError::VersionMismatch("x".into()).is_fatal());
        assert!(RestError::ConfigurationConflict("x".into()).is_fatal());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: RestError = io_err.into();
        assert!(matches!(err, RestError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: RestError = json_err.into();
        assert!(matches!(err, RestError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: RestError = toml_err.into();
        assert!(matches!(err, RestError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }
}
