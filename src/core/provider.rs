//! Component providers
//!
//! A provider hands the registries their raw material: the resource
//! registration table and the search handler instances. [`Catalog`] is the
//! plain table implementation; resource modules add themselves to it at
//! startup.

use super::resource::ResourceRegistration;
use super::search::SearchHandler;
use crate::domain::Result;
use std::sync::Arc;

/// Source of resource registrations and search handlers
pub trait ComponentProvider: Send + Sync {
    /// Every resource registration, supported on this platform or not
    fn resource_registrations(&self) -> Result<Vec<ResourceRegistration>>;

    /// Every search handler, supported on this platform or not
    fn search_handlers(&self) -> Result<Vec<Arc<dyn SearchHandler>>>;
}

/// Static registration table
#[derive(Default, Clone)]
pub struct Catalog {
    resources: Vec<ResourceRegistration>,
    search_handlers: Vec<Arc<dyn SearchHandler>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_resource(&mut self, registration: ResourceRegistration) -> &mut Self {
        self.resources.push(registration);
        self
    }

    pub fn register_search_handler(&mut self, handler: Arc<dyn SearchHandler>) -> &mut Self {
        self.search_handlers.push(handler);
        self
    }

    pub fn with_resource(mut self, registration: ResourceRegistration) -> Self {
        self.register_resource(registration);
        self
    }

    pub fn with_search_handler(mut self, handler: Arc<dyn SearchHandler>) -> Self {
        self.register_search_handler(handler);
        self
    }
}

impl ComponentProvider for Catalog {
    fn resource_registrations(&self) -> Result<Vec<ResourceRegistration>> {
        Ok(self.resources.clone())
    }

    fn search_handlers(&self) -> Result<Vec<Arc<dyn SearchHandler>>> {
        Ok(self.search_handlers.clone())
    }
}
