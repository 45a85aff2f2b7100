//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "restws.toml")]
    pub output: String,

    /// Include explanatory comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing restws configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Set platform.version to the platform you are serving");
                println!("  2. Point data.fixture_path at a dictionary fixture");
                println!("  3. Validate configuration: restws validate-config");
                println!("  4. List registered components: restws registry");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    fn generate_minimal_config() -> &'static str {
        r#"# restws Configuration File

[application]
log_level = "info"

[platform]
version = "1.9.0"

[request]
default_limit = 50
max_limit = 100

[representation]
max_concept_set_depth = 8

[data]
fixture_path = "fixtures/demo-dictionary.json"

[logging]
local_enabled = false
local_path = "/var/log/restws"
local_rotation = "daily"
"#
    }

    fn generate_config_with_examples() -> &'static str {
        r#"# restws Configuration File
#
# Every value can be overridden with a RESTWS_<SECTION>_<KEY> environment
# variable, and ${VAR} references are substituted before parsing.

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[platform]
# Version of the running platform. Resources and search handlers whose
# supported versions do not match are skipped when registries are built.
version = "1.9.0"

[request]
# Parameter names that never take part in search handler selection
reserved_parameters = ["v", "s", "limit", "startIndex", "includeAll", "totalCount"]

# Page size when no limit is requested, and the largest page served
default_limit = 50
max_limit = 100

[representation]
# Nesting depth at which concept set members are rendered as refs (1-64)
max_concept_set_depth = 8

[data]
# JSON dictionary loaded into the in-memory store
fixture_path = "fixtures/demo-dictionary.json"

[logging]
# JSON log files with rotation: daily | hourly | never
local_enabled = false
local_path = "/var/log/restws"
local_rotation = "daily"
"#
    }
}
