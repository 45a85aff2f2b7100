//! REST service
//!
//! Entry point for resource, representation and search handler lookups. The
//! service owns both registries and builds each on first use. Builds are
//! single-flight: concurrent first callers wait for one build, and a failed
//! build publishes nothing so a later call can retry it.

use super::constants::SPECIAL_REQUEST_PARAMETERS;
use super::provider::ComponentProvider;
use super::request::RequestParameters;
use super::resource::{Resource, ResourceRegistry};
use super::search::{SearchHandler, SearchHandlerRegistry};
use crate::domain::{DomainType, PlatformVersion, Representation, RestError, Result};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

/// Registry owner shared by every request handler as `Arc<RestService>`
pub struct RestService {
    provider: Arc<dyn ComponentProvider>,
    platform_version: PlatformVersion,
    reserved_parameters: BTreeSet<String>,
    resources: OnceLock<ResourceRegistry>,
    search_handlers: OnceLock<SearchHandlerRegistry>,
    build_lock: Mutex<()>,
}

impl RestService {
    /// Creates a service using the default reserved request parameters
    pub fn new(provider: Arc<dyn ComponentProvider>, platform_version: PlatformVersion) -> Self {
        Self {
            provider,
            platform_version,
            reserved_parameters: SPECIAL_REQUEST_PARAMETERS
                .iter()
                .map(|name| name.to_string())
                .collect(),
            resources: OnceLock::new(),
            search_handlers: OnceLock::new(),
            build_lock: Mutex::new(()),
        }
    }

    /// Replaces the parameter names that never select a search handler
    pub fn with_reserved_parameters<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        self.reserved_parameters = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn platform_version(&self) -> &PlatformVersion {
        &self.platform_version
    }

    pub fn reserved_parameters(&self) -> &BTreeSet<String> {
        &self.reserved_parameters
    }

    /// Resource registered under a path name such as `concept` or `concept/mapping`
    pub fn get_resource_by_name(&self, name: &str) -> Result<Arc<dyn Resource>> {
        self.resource_registry()?.get_by_name(name)
    }

    /// Resource for a domain type, falling back to the nearest registered supertype
    pub fn get_resource_by_supported_type(
        &self,
        domain_type: &DomainType,
    ) -> Result<Arc<dyn Resource>> {
        self.resource_registry()?.get_by_supported_type(domain_type)
    }

    /// Parses the `v` request token; absent or empty means the default representation
    pub fn get_representation(&self, requested: Option<&str>) -> Result<Representation> {
        Representation::parse(requested)
    }

    /// Search handler selected by the request parameters, if any
    pub fn get_search_handler(
        &self,
        resource: &str,
        parameters: &RequestParameters,
    ) -> Result<Option<Arc<dyn SearchHandler>>> {
        self.search_handler_registry()?
            .get_search_handler(resource, parameters, &self.reserved_parameters)
    }

    /// Resource registry, built on first call
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Platform`] if the provider fails and
    /// [`RestError::ConfigurationConflict`] for conflicting registrations.
    pub fn resource_registry(&self) -> Result<&ResourceRegistry> {
        if let Some(registry) = self.resources.get() {
            return Ok(registry);
        }
        let _guard = self.lock_build();
        if let Some(registry) = self.resources.get() {
            return Ok(registry);
        }

        let registrations = self
            .provider
            .resource_registrations()
            .map_err(|e| RestError::platform("Cannot access REST resources", e))?;
        let registry = ResourceRegistry::build(&registrations, &self.platform_version)?;
        Ok(self.resources.get_or_init(|| registry))
    }

    /// Search handler registry, built on first call
    pub fn search_handler_registry(&self) -> Result<&SearchHandlerRegistry> {
        if let Some(registry) = self.search_handlers.get() {
            return Ok(registry);
        }
        let _guard = self.lock_build();
        if let Some(registry) = self.search_handlers.get() {
            return Ok(registry);
        }

        let handlers = self
            .provider
            .search_handlers()
            .map_err(|e| RestError::platform("Cannot access REST search handlers", e))?;
        let registry = SearchHandlerRegistry::build(handlers, &self.platform_version)?;
        Ok(self.search_handlers.get_or_init(|| registry))
    }

    fn lock_build(&self) -> MutexGuard<'_, ()> {
        // The lock guards no data, so a poisoned lock is still usable.
        self.build_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for RestService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestService")
            .field("platform_version", &self.platform_version)
            .field("resources_built", &self.resources.get().is_some())
            .field("search_handlers_built", &self.search_handlers.get().is_some())
            .finish_non_exhaustive()
    }
}
