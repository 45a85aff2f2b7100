//! Query command implementation
//!
//! Lists a resource, through a search handler when the parameters select one.

use super::runtime::{report, Runtime};
use crate::core::request::RequestParameters;
use crate::domain::RestError;
use clap::Args;

/// Arguments for the query command
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Resource name, e.g. `concept`
    pub resource: String,

    /// Uuid of the parent object, for sub-resources
    #[arg(long)]
    pub parent: Option<String>,

    /// Request parameters as key=value, e.g. `q=pulse v=full limit=10`
    pub parameters: Vec<String>,
}

impl QueryArgs {
    /// Execute the query command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(resource = %self.resource, "Querying resource");

        let parameters = match parse_parameters(&self.parameters) {
            Ok(parameters) => parameters,
            Err(e) => return Ok(report(&e)),
        };
        let runtime = match Runtime::load(config_path) {
            Ok(runtime) => runtime,
            Err(e) => return Ok(report(&e)),
        };

        match runtime
            .dispatcher
            .list(&self.resource, self.parent.as_deref(), &parameters)
        {
            Ok(body) => {
                println!("{}", serde_json::to_string_pretty(&body)?);
                Ok(0)
            }
            Err(e) => Ok(report(&e)),
        }
    }
}

fn parse_parameters(raw: &[String]) -> Result<RequestParameters, RestError> {
    raw.iter()
        .map(|pair| match pair.split_once('=') {
            Some((name, value)) if !name.is_empty() => Ok((name, value)),
            _ => Err(RestError::Validation(format!(
                "Expected key=value parameter, got '{pair}'"
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_parameters() {
        let raw = vec!["q=pulse".to_string(), "v=custom:(uuid,name)".to_string()];
        let parameters = parse_parameters(&raw).unwrap();
        assert_eq!(parameters.get("q"), Some("pulse"));
        assert_eq!(parameters.representation(), Some("custom:(uuid,name)"));
    }

    #[test]
    fn test_parse_parameters_rejects_bare_words() {
        let raw = vec!["pulse".to_string()];
        assert!(matches!(
            parse_parameters(&raw),
            Err(RestError::Validation(_))
        ));
    }
}
