//! Resources and the resource registry
//!
//! A [`Resource`] maps one domain type to its REST path and representations.
//! Resources are made available through [`ResourceRegistration`]s; the
//! [`ResourceRegistry`] picks one implementation per path name and indexes the
//! winners by name and by supported domain type.

pub mod declaration;
pub mod registry;

pub use declaration::{
    Declaration, ResourceDeclaration, ResourceFactory, ResourceRegistration,
    SubResourceDeclaration,
};
pub use registry::{ResourceDefinition, ResourceRegistry};

use crate::adapters::store::DataStore;
use crate::domain::{DomainObject, Representation, Result, SimpleObject};

/// Settings and collaborators available while building a representation
#[derive(Clone, Copy)]
pub struct RepresentationContext<'a> {
    pub store: &'a dyn DataStore,
    /// Maximum nesting of concept set members rendered beyond a reference
    pub max_depth: usize,
}

impl<'a> RepresentationContext<'a> {
    pub fn new(store: &'a dyn DataStore, max_depth: usize) -> Self {
        Self { store, max_depth }
    }
}

/// A REST resource
///
/// Sub-resources receive the uuid of their parent object in `parent`;
/// top-level resources ignore it.
pub trait Resource: Send + Sync {
    /// Converts a domain object into the requested representation
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::RestError::UnsupportedOperation`] for
    /// representations or objects the resource does not handle.
    fn represent(
        &self,
        object: &DomainObject,
        representation: &Representation,
        ctx: &RepresentationContext<'_>,
    ) -> Result<SimpleObject>;

    /// Fetches one object by uuid
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::RestError::ObjectNotFound`] when no object has
    /// this uuid.
    fn retrieve(
        &self,
        uuid: &str,
        parent: Option<&str>,
        store: &dyn DataStore,
    ) -> Result<DomainObject>;

    /// Lists all objects served by this resource
    fn list(&self, parent: Option<&str>, store: &dyn DataStore) -> Result<Vec<DomainObject>>;
}

impl std::fmt::Debug for dyn Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Resource")
    }
}
