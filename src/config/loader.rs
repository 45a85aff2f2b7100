//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::RestConfig;
use crate::domain::errors::RestError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into RestConfig
/// 4. Applies environment variable overrides (RESTWS_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`RestError::Configuration`] if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use restws::config::load_config;
///
/// let config = load_config("restws.toml").expect("Failed to load config");
/// println!("Platform version: {}", config.platform.version);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RestConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RestError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RestError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let config = parse_config(&contents)?;
    tracing::debug!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

/// Parses configuration text, applying substitution, overrides and validation
pub fn parse_config(contents: &str) -> Result<RestConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: RestConfig = toml::from_str(&contents)
        .map_err(|e| RestError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        RestError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("environment variable pattern is valid")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied unchanged.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(RestError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        RestError::Configuration(format!("Invalid value '{value}' for environment variable {name}"))
    })
}

/// Applies environment variable overrides using RESTWS_* prefix
///
/// Environment variables follow the pattern: RESTWS_<SECTION>_<KEY>
/// For example: RESTWS_PLATFORM_VERSION, RESTWS_REQUEST_MAX_LIMIT
fn apply_env_overrides(config: &mut RestConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("RESTWS_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Platform overrides
    if let Ok(val) = std::env::var("RESTWS_PLATFORM_VERSION") {
        config.platform.version = val;
    }

    // Request overrides
    if let Ok(val) = std::env::var("RESTWS_REQUEST_RESERVED_PARAMETERS") {
        config.request.reserved_parameters = val
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect();
    }
    if let Ok(val) = std::env::var("RESTWS_REQUEST_DEFAULT_LIMIT") {
        config.request.default_limit = parse_env("RESTWS_REQUEST_DEFAULT_LIMIT", &val)?;
    }
    if let Ok(val) = std::env::var("RESTWS_REQUEST_MAX_LIMIT") {
        config.request.max_limit = parse_env("RESTWS_REQUEST_MAX_LIMIT", &val)?;
    }

    // Representation overrides
    if let Ok(val) = std::env::var("RESTWS_REPRESENTATION_MAX_CONCEPT_SET_DEPTH") {
        config.representation.max_concept_set_depth =
            parse_env("RESTWS_REPRESENTATION_MAX_CONCEPT_SET_DEPTH", &val)?;
    }

    // Data overrides
    if let Ok(val) = std::env::var("RESTWS_DATA_FIXTURE_PATH") {
        config.data.fixture_path = Some(val);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("RESTWS_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_env("RESTWS_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("RESTWS_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("RESTWS_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
