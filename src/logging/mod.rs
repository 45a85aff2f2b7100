//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - Console output for operators
//! - Optional JSON log files with rotation
//! - Configurable log levels, overridable with `RUST_LOG`
//!
//! # Example
//!
//! ```no_run
//! use restws::logging::init_logging;
//! use restws::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the outcome of a registry build
///
/// # Example
///
/// ```no_run
/// use restws::log_registry_built;
///
/// log_registry_built!("resource", 4, 1);
/// ```
#[macro_export]
macro_rules! log_registry_built {
    ($kind:expr, $registered:expr, $skipped:expr) => {
        tracing::info!(
            kind = $kind,
            registered = $registered,
            skipped = $skipped,
            "Registry built"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use restws::log_error_with_context;
/// use restws::domain::RestError;
///
/// let error = RestError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
