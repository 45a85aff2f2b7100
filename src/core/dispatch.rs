//! Request dispatch
//!
//! Turns a resource path, optional parent uuid and request parameters into a
//! rendered JSON body using the service's registries and the data store.

use super::constants::REQUEST_PROPERTY_FOR_TOTAL_COUNT;
use super::request::RequestParameters;
use super::resource::RepresentationContext;
use super::service::RestService;
use crate::adapters::store::DataStore;
use crate::domain::{DomainObject, Representation, RestError, Result, SimpleObject};
use serde_json::Value;
use std::sync::Arc;

/// Paging and rendering limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSettings {
    /// Page size when the request has no `limit`
    pub default_limit: usize,
    /// Upper bound applied to any requested `limit`
    pub max_limit: usize,
    /// Deepest level of concept set members rendered beyond a reference
    pub max_depth: usize,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            default_limit: 50,
            max_limit: 100,
            max_depth: 8,
        }
    }
}

/// Serves retrieve and list requests
#[derive(Clone)]
pub struct RestDispatcher {
    service: Arc<RestService>,
    store: Arc<dyn DataStore>,
    settings: DispatchSettings,
}

impl RestDispatcher {
    pub fn new(
        service: Arc<RestService>,
        store: Arc<dyn DataStore>,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            service,
            store,
            settings,
        }
    }

    pub fn service(&self) -> &Arc<RestService> {
        &self.service
    }

    /// Renders one object of `resource` in the representation requested by `v`
    ///
    /// # Errors
    ///
    /// Returns [`RestError::ResourceNotFound`] for an unknown resource,
    /// [`RestError::ObjectNotFound`] for an unknown uuid, and
    /// [`RestError::UnsupportedOperation`] for a representation the resource
    /// cannot produce.
    pub fn retrieve(
        &self,
        resource: &str,
        parent: Option<&str>,
        uuid: &str,
        parameters: &RequestParameters,
    ) -> Result<SimpleObject> {
        let representation = self.service.get_representation(parameters.representation())?;
        let handler = self.service.get_resource_by_name(resource)?;
        let object = handler.retrieve(uuid, parent, self.store.as_ref())?;
        tracing::debug!(resource, uuid, %representation, "Retrieving object");
        handler.represent(&object, &representation, &self.context())
    }

    /// Lists objects of `resource`, through a search handler when one matches
    ///
    /// The body is `{"results": [...]}`, with `totalCount` added when the
    /// request asks for it.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::ResourceNotFound`] for an unknown resource,
    /// [`RestError::Validation`] for non-numeric paging parameters and any
    /// search resolution error.
    pub fn list(
        &self,
        resource: &str,
        parent: Option<&str>,
        parameters: &RequestParameters,
    ) -> Result<SimpleObject> {
        let representation = self.service.get_representation(parameters.representation())?;
        let handler = self.service.get_resource_by_name(resource)?;
        let start_index = parameters.start_index()?.unwrap_or(0);
        let limit = parameters
            .limit()?
            .unwrap_or(self.settings.default_limit)
            .min(self.settings.max_limit);

        let objects = match self.service.get_search_handler(resource, parameters)? {
            Some(search) => {
                tracing::debug!(resource, search = %search.config().key(), "Running search");
                search.search(parameters, self.store.as_ref())?
            }
            None => handler.list(parent, self.store.as_ref())?,
        };
        let total = objects.len();

        let results = objects
            .iter()
            .skip(start_index)
            .take(limit)
            .map(|object| self.represent(object, &representation))
            .collect::<Result<Vec<_>>>()?;

        let mut body = SimpleObject::new();
        body.insert("results".to_string(), Value::Array(results));
        if wants_total_count(parameters) {
            body.insert("totalCount".to_string(), Value::from(total));
        }
        Ok(body)
    }

    /// Renders an object with the resource registered for its domain type
    fn represent(&self, object: &DomainObject, representation: &Representation) -> Result<Value> {
        let resource = self
            .service
            .get_resource_by_supported_type(object.domain_type())
            .map_err(|e| match e {
                RestError::ResourceNotFound(_) => RestError::ResourceNotFound(format!(
                    "no resource for domain type {}",
                    object.domain_type()
                )),
                other => other,
            })?;
        resource
            .represent(object, representation, &self.context())
            .map(Value::Object)
    }

    fn context(&self) -> RepresentationContext<'_> {
        RepresentationContext::new(self.store.as_ref(), self.settings.max_depth)
    }
}

fn wants_total_count(parameters: &RequestParameters) -> bool {
    parameters
        .get(REQUEST_PROPERTY_FOR_TOTAL_COUNT)
        .is_some_and(|value| value.is_empty() || value.eq_ignore_ascii_case("true"))
}

impl std::fmt::Debug for RestDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestDispatcher")
            .field("service", &self.service)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
