//! Wiring shared by the commands that serve requests

use crate::adapters::resources::default_catalog;
use crate::adapters::store::InMemoryStore;
use crate::config::{load_config, RestConfig};
use crate::core::dispatch::RestDispatcher;
use crate::core::service::RestService;
use crate::domain::{PlatformVersion, RestError, Result};
use std::sync::Arc;

/// Configuration, service and dispatcher built from a configuration file
pub struct Runtime {
    pub config: RestConfig,
    pub service: Arc<RestService>,
    pub dispatcher: RestDispatcher,
}

impl Runtime {
    /// Loads the configuration and the dictionary fixture it names
    pub fn load(config_path: &str) -> Result<Self> {
        let config = load_config(config_path)?;
        Self::from_config(config)
    }

    pub fn from_config(config: RestConfig) -> Result<Self> {
        let platform_version = PlatformVersion::new(config.platform.version.as_str())?;
        let store = match &config.data.fixture_path {
            Some(path) => InMemoryStore::load(path)?,
            None => {
                tracing::warn!("No dictionary fixture configured, serving an empty store");
                InMemoryStore::new()
            }
        };

        let service = Arc::new(
            RestService::new(Arc::new(default_catalog()), platform_version)
                .with_reserved_parameters(config.request.reserved_parameters.iter().cloned()),
        );
        let dispatcher = RestDispatcher::new(
            Arc::clone(&service),
            Arc::new(store),
            config.dispatch_settings(),
        );
        Ok(Self {
            config,
            service,
            dispatcher,
        })
    }
}

/// Process exit code for an error
///
/// Configuration errors exit with 2, registry construction failures with 5
/// and request errors with 1.
pub fn exit_code(error: &RestError) -> i32 {
    match error {
        RestError::Configuration(_) => 2,
        e if e.is_fatal() => 5,
        _ => 1,
    }
}

/// Prints an error the way every command reports failures
pub fn report(error: &RestError) -> i32 {
    crate::log_error_with_context!(error, "Command failed");
    println!("❌ {error}");
    exit_code(error)
}
