//! Get command implementation
//!
//! Retrieves one object by uuid and prints its representation.

use super::runtime::{report, Runtime};
use crate::core::constants::REQUEST_PROPERTY_FOR_REPRESENTATION;
use crate::core::request::RequestParameters;
use clap::Args;

/// Arguments for the get command
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Resource name, e.g. `concept` or `concept/mapping`
    pub resource: String,

    /// Uuid of the object
    pub uuid: String,

    /// Uuid of the parent object, for sub-resources
    #[arg(long)]
    pub parent: Option<String>,

    /// Representation: ref, default, full or custom:(field,...)
    #[arg(short = 'v', long = "representation")]
    pub representation: Option<String>,
}

impl GetArgs {
    /// Execute the get command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(resource = %self.resource, uuid = %self.uuid, "Retrieving object");

        let runtime = match Runtime::load(config_path) {
            Ok(runtime) => runtime,
            Err(e) => return Ok(report(&e)),
        };

        let mut parameters = RequestParameters::new();
        if let Some(representation) = &self.representation {
            parameters.insert(REQUEST_PROPERTY_FOR_REPRESENTATION, representation.as_str());
        }

        match runtime.dispatcher.retrieve(
            &self.resource,
            self.parent.as_deref(),
            &self.uuid,
            &parameters,
        ) {
            Ok(body) => {
                println!("{}", serde_json::to_string_pretty(&body)?);
                Ok(0)
            }
            Err(e) => Ok(report(&e)),
        }
    }
}
