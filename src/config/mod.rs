//! Configuration management for restws.
//!
//! # Overview
//!
//! restws uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `RESTWS_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`PlatformConfig`] - Platform version used to select components
//! - [`RequestConfig`] - Reserved parameters and paging limits
//! - [`RepresentationConfig`] - Concept set nesting depth
//! - [`DataConfig`] - Dictionary fixture
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [platform]
//! version = "${RESTWS_PLATFORM}"
//!
//! [request]
//! default_limit = 50
//! max_limit = 100
//!
//! [data]
//! fixture_path = "fixtures/demo-dictionary.json"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, DataConfig, LoggingConfig, PlatformConfig, RepresentationConfig,
    RequestConfig, RestConfig,
};
