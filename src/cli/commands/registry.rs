//! Registry command implementation
//!
//! Builds both registries for the configured platform version and lists
//! what was registered.

use super::runtime::{report, Runtime};
use clap::Args;

/// Arguments for the registry command
#[derive(Args, Debug)]
pub struct RegistryArgs {
    /// Print search handler parameters
    #[arg(long)]
    pub verbose: bool,
}

impl RegistryArgs {
    /// Execute the registry command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let runtime = match Runtime::load(config_path) {
            Ok(runtime) => runtime,
            Err(e) => return Ok(report(&e)),
        };
        let service = &runtime.service;

        let resources = match service.resource_registry() {
            Ok(registry) => registry,
            Err(e) => return Ok(report(&e)),
        };
        let search_handlers = match service.search_handler_registry() {
            Ok(registry) => registry,
            Err(e) => return Ok(report(&e)),
        };

        println!("Platform version: {}", service.platform_version());
        println!();
        println!("Resources ({}):", resources.len());
        for definition in resources.definitions() {
            println!(
                "  {:<28} {:<32} {}",
                definition.name, definition.implementation, definition.supported_type
            );
        }
        println!();
        println!("Search handlers ({}):", search_handlers.len());
        for handler in search_handlers.handlers() {
            let config = handler.config();
            println!("  {}", config.key());
            if self.verbose {
                let join = |names: &std::collections::BTreeSet<String>| {
                    names.iter().cloned().collect::<Vec<_>>().join(", ")
                };
                println!("      required: {}", join(&config.required_parameters));
                println!("      optional: {}", join(&config.optional_parameters));
                if let Some(description) = &config.description {
                    println!("      {description}");
                }
            }
        }
        Ok(0)
    }
}
