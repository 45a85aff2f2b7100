//! Search handler contract

use crate::adapters::store::DataStore;
use crate::core::request::RequestParameters;
use crate::domain::{DomainObject, Result};
use std::collections::BTreeSet;
use std::fmt;

/// What a search handler answers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Id unique within the supported resource, selectable with `s=<id>`
    pub id: String,
    /// Path name of the resource searched, e.g. `concept`
    pub supported_resource: String,
    /// Version constraints; empty means every platform version
    pub supported_platform_versions: Vec<String>,
    pub required_parameters: BTreeSet<String>,
    pub optional_parameters: BTreeSet<String>,
    pub description: Option<String>,
}

impl SearchConfig {
    pub fn new(id: impl Into<String>, supported_resource: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            supported_resource: supported_resource.into(),
            supported_platform_versions: Vec::new(),
            required_parameters: BTreeSet::new(),
            optional_parameters: BTreeSet::new(),
            description: None,
        }
    }

    pub fn with_platform_versions<S: Into<String>>(
        mut self,
        versions: impl IntoIterator<Item = S>,
    ) -> Self {
        self.supported_platform_versions = versions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_required<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.required_parameters
            .extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_optional<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.optional_parameters
            .extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Required and optional parameter names
    pub fn parameters(&self) -> impl Iterator<Item = &str> {
        self.required_parameters
            .union(&self.optional_parameters)
            .map(String::as_str)
    }

    pub fn key(&self) -> SearchHandlerKey {
        SearchHandlerKey::new(&self.supported_resource, &self.id)
    }
}

/// Identity of a search handler: `(resource path name, search id)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SearchHandlerKey {
    pub supported_resource: String,
    pub id: String,
}

impl SearchHandlerKey {
    pub fn new(supported_resource: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            supported_resource: supported_resource.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for SearchHandlerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}?s={}", self.supported_resource, self.id)
    }
}

/// A custom query over one resource
pub trait SearchHandler: Send + Sync {
    fn config(&self) -> &SearchConfig;

    /// Implementation name used in diagnostics
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Runs the search; `parameters` carries at least the required parameters
    fn search(
        &self,
        parameters: &RequestParameters,
        store: &dyn DataStore,
    ) -> Result<Vec<DomainObject>>;
}

impl fmt::Debug for dyn SearchHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SearchHandler({})", self.config().key())
    }
}
