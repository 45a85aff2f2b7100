//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the restws configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Platform Version: {}", config.platform.version);
        println!(
            "  Reserved Parameters: {}",
            config.request.reserved_parameters.join(", ")
        );
        println!(
            "  Paging: default {} / max {}",
            config.request.default_limit, config.request.max_limit
        );
        println!(
            "  Max Concept Set Depth: {}",
            config.representation.max_concept_set_depth
        );
        match &config.data.fixture_path {
            Some(path) => println!("  Dictionary Fixture: {path}"),
            None => println!("  Dictionary Fixture: (none)"),
        }
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[platform]\nversion = \"1.9.4\"").unwrap();
        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn test_validate_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[application]\nlog_level = \"loud\"").unwrap();
        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .unwrap();
        assert_eq!(code, 2);
    }
}
