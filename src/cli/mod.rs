//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for restws using clap.

pub mod commands;

use crate::config::{load_config, LoggingConfig};
use clap::{Parser, Subcommand};

/// restws - REST resource and search dispatcher
#[derive(Parser, Debug)]
#[command(name = "restws")]
#[command(version, about, long_about = None)]
#[command(author = "restws Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "restws.toml", env = "RESTWS_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RESTWS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log level and logging settings for this invocation
    ///
    /// The `--log-level` flag wins over `[application].log_level`. A config
    /// file that is missing or invalid falls back to console-only defaults so
    /// `init` and `validate-config` can still run and report the problem.
    pub fn logging_settings(&self) -> (String, LoggingConfig) {
        match load_config(&self.config) {
            Ok(config) => (
                self.log_level
                    .clone()
                    .unwrap_or(config.application.log_level),
                config.logging,
            ),
            Err(_) => (
                self.log_level.clone().unwrap_or_else(|| "info".to_string()),
                LoggingConfig::default(),
            ),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the resources and search handlers registered for the platform
    Registry(commands::registry::RegistryArgs),

    /// Retrieve one object by uuid
    Get(commands::get::GetArgs),

    /// List or search a resource
    Query(commands::query::QueryArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Commands {
    /// Runs the command and returns the process exit code
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        match self {
            Commands::Registry(args) => args.execute(config_path),
            Commands::Get(args) => args.execute(config_path),
            Commands::Query(args) => args.execute(config_path),
            Commands::ValidateConfig(args) => args.execute(config_path),
            Commands::Init(args) => args.execute(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_registry() {
        let cli = Cli::parse_from(["restws", "registry"]);
        assert_eq!(cli.config, "restws.toml");
        assert!(matches!(cli.command, Commands::Registry(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["restws", "--config", "custom.toml", "registry"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["restws", "--log-level", "debug", "registry"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_get() {
        let cli = Cli::parse_from([
            "restws",
            "get",
            "concept/mapping",
            "m1",
            "--parent",
            "c1",
            "-v",
            "full",
        ]);
        match cli.command {
            Commands::Get(args) => {
                assert_eq!(args.resource, "concept/mapping");
                assert_eq!(args.uuid, "m1");
                assert_eq!(args.parent.as_deref(), Some("c1"));
                assert_eq!(args.representation.as_deref(), Some("full"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_query() {
        let cli = Cli::parse_from(["restws", "query", "concept", "q=pulse", "limit=5"]);
        match cli.command {
            Commands::Query(args) => {
                assert_eq!(args.resource, "concept");
                assert_eq!(args.parameters, vec!["q=pulse", "limit=5"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["restws", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_logging_settings_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        let config_path = dir.path().join("restws.toml");
        std::fs::write(
            &config_path,
            format!(
                "[application]\nlog_level = \"debug\"\n\n[logging]\nlocal_enabled = true\nlocal_path = {:?}\nlocal_rotation = \"hourly\"\n",
                log_dir.to_str().unwrap()
            ),
        )
        .unwrap();
        let config_arg = config_path.to_str().unwrap();

        let cli = Cli::parse_from(["restws", "-c", config_arg, "registry"]);
        let (level, logging) = cli.logging_settings();
        assert_eq!(level, "debug");
        assert!(logging.local_enabled);
        assert_eq!(logging.local_rotation, "hourly");

        let cli = Cli::parse_from(["restws", "-c", config_arg, "-l", "warn", "registry"]);
        assert_eq!(cli.logging_settings().0, "warn");
    }

    #[test]
    fn test_logging_settings_without_config() {
        let cli = Cli::parse_from(["restws", "-c", "/nonexistent/restws.toml", "init"]);
        let (level, logging) = cli.logging_settings();
        assert_eq!(level, "info");
        assert!(!logging.local_enabled);
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["restws", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
