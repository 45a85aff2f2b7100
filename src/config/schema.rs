//! Configuration schema types
//!
//! This module defines the configuration structure for restws.

use crate::core::constants::SPECIAL_REQUEST_PARAMETERS;
use crate::core::dispatch::DispatchSettings;
use serde::{Deserialize, Serialize};

/// Main restws configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Host platform settings
    #[serde(default)]
    pub platform: PlatformConfig,

    /// Request handling settings
    #[serde(default)]
    pub request: RequestConfig,

    /// Representation settings
    #[serde(default)]
    pub representation: RepresentationConfig,

    /// Dictionary data settings
    #[serde(default)]
    pub data: DataConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RestConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.platform.validate()?;
        self.request.validate()?;
        self.representation.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Paging and depth limits for the dispatcher
    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            default_limit: self.request.default_limit,
            max_limit: self.request.max_limit,
            max_depth: self.representation.max_concept_set_depth,
        }
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

/// Host platform configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Version the registries filter components against, e.g. `1.9.4`
    #[serde(default = "default_platform_version")]
    pub version: String,
}

impl PlatformConfig {
    fn validate(&self) -> Result<(), String> {
        crate::domain::PlatformVersion::new(self.version.as_str())
            .map(|_| ())
            .map_err(|e| format!("platform.version: {e}"))
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            version: default_platform_version(),
        }
    }
}

/// Request handling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Parameter names that never select a search handler
    #[serde(default = "default_reserved_parameters")]
    pub reserved_parameters: Vec<String>,

    /// Page size when a request has no `limit`
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Largest page size a request may ask for
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl RequestConfig {
    fn validate(&self) -> Result<(), String> {
        if self.default_limit == 0 {
            return Err("request.default_limit must be > 0".to_string());
        }
        if self.max_limit < self.default_limit {
            return Err(format!(
                "request.max_limit ({}) must be >= request.default_limit ({})",
                self.max_limit, self.default_limit
            ));
        }
        if self.reserved_parameters.iter().any(|p| p.trim().is_empty()) {
            return Err("request.reserved_parameters must not contain empty names".to_string());
        }
        Ok(())
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            reserved_parameters: default_reserved_parameters(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

/// Representation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepresentationConfig {
    /// Nesting depth beyond which concept set members are rendered as references
    #[serde(default = "default_max_concept_set_depth")]
    pub max_concept_set_depth: usize,
}

impl RepresentationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_concept_set_depth > 64 {
            return Err(format!(
                "representation.max_concept_set_depth ({}) must be <= 64",
                self.max_concept_set_depth
            ));
        }
        Ok(())
    }
}

impl Default for RepresentationConfig {
    fn default() -> Self {
        Self {
            max_concept_set_depth: default_max_concept_set_depth(),
        }
    }
}

/// Dictionary data configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// JSON dictionary fixture loaded into the in-memory store; empty store when unset
    #[serde(default)]
    pub fixture_path: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
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
            return Err("logging.local_path is required when local logging is enabled".to_string());
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

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_platform_version() -> String {
    "1.9.0".to_string()
}

fn default_reserved_parameters() -> Vec<String> {
    SPECIAL_REQUEST_PARAMETERS
        .iter()
        .map(|p| p.to_string())
        .collect()
}

fn default_limit() -> usize {
    50
}

fn default_max_limit() -> usize {
    100
}

fn default_max_concept_set_depth() -> usize {
    8
}

fn default_local_path() -> String {
    "/var/log/restws".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RestConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.request.reserved_parameters.len(), 6);
        assert_eq!(config.dispatch_settings(), DispatchSettings::default());
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_platform_version_validation() {
        let mut config = PlatformConfig::default();
        assert!(config.validate().is_ok());

        config.version = "one.nine".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_request_limits_validation() {
        let mut config = RequestConfig::default();
        config.max_limit = 10;
        let err = config.validate().unwrap_err();
        assert!(err.contains("request.max_limit"));

        config.max_limit = 100;
        config.default_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_rotation_validation() {
        let mut config = LoggingConfig::default();
        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: RestConfig = toml::from_str("").unwrap();
        assert_eq!(config.platform.version, "1.9.0");
        assert_eq!(config.representation.max_concept_set_depth, 8);
        assert!(config.data.fixture_path.is_none());
    }
}
