//! Resource declarations and registrations
//!
//! A registration pairs an implementation name with its declared metadata and
//! a constructor. Registrations replace runtime class scanning: each resource
//! module contributes its registrations to a provider's table.

use super::Resource;
use crate::core::constants::DEFAULT_ORDER;
use crate::domain::{DomainType, Result};
use std::fmt;
use std::sync::Arc;

/// Declaration of a top-level resource
#[derive(Debug, Clone)]
pub struct ResourceDeclaration {
    /// Path name, e.g. `concept`
    pub name: String,
    pub supported_type: &'static DomainType,
    /// Priority among resources sharing `name`; lower wins
    pub order: i32,
    /// Version constraints; empty means every platform version
    pub supported_platform_versions: Vec<String>,
}

impl ResourceDeclaration {
    pub fn new(name: impl Into<String>, supported_type: &'static DomainType) -> Self {
        Self {
            name: name.into(),
            supported_type,
            order: DEFAULT_ORDER,
            supported_platform_versions: Vec::new(),
        }
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    pub fn with_platform_versions<S: Into<String>>(
        mut self,
        versions: impl IntoIterator<Item = S>,
    ) -> Self {
        self.supported_platform_versions = versions.into_iter().map(Into::into).collect();
        self
    }
}

/// Declaration of a resource nested under a parent resource's path
///
/// The full name is `<parent name>/<path>`. An empty version list inherits
/// the parent's constraints.
#[derive(Debug, Clone)]
pub struct SubResourceDeclaration {
    /// Implementation name of the parent registration
    pub parent: String,
    pub path: String,
    pub supported_type: &'static DomainType,
    pub order: i32,
    pub supported_platform_versions: Vec<String>,
}

impl SubResourceDeclaration {
    pub fn new(
        parent: impl Into<String>,
        path: impl Into<String>,
        supported_type: &'static DomainType,
    ) -> Self {
        Self {
            parent: parent.into(),
            path: path.into(),
            supported_type,
            order: DEFAULT_ORDER,
            supported_platform_versions: Vec::new(),
        }
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    pub fn with_platform_versions<S: Into<String>>(
        mut self,
        versions: impl IntoIterator<Item = S>,
    ) -> Self {
        self.supported_platform_versions = versions.into_iter().map(Into::into).collect();
        self
    }
}

/// Metadata a resource implementation declares about itself
#[derive(Debug, Clone)]
pub enum Declaration {
    Resource(ResourceDeclaration),
    SubResource(SubResourceDeclaration),
}

impl From<ResourceDeclaration> for Declaration {
    fn from(declaration: ResourceDeclaration) -> Self {
        Declaration::Resource(declaration)
    }
}

impl From<SubResourceDeclaration> for Declaration {
    fn from(declaration: SubResourceDeclaration) -> Self {
        Declaration::SubResource(declaration)
    }
}

/// No-argument constructor of a resource implementation
pub type ResourceFactory = Arc<dyn Fn() -> Result<Arc<dyn Resource>> + Send + Sync>;

/// An entry of the resource registration table
#[derive(Clone)]
pub struct ResourceRegistration {
    implementation: String,
    declaration: Option<Declaration>,
    factory: ResourceFactory,
}

impl ResourceRegistration {
    /// Registers an implementation; `None` declares nothing and the entry is skipped
    pub fn new(
        implementation: impl Into<String>,
        declaration: Option<Declaration>,
        factory: impl Fn() -> Result<Arc<dyn Resource>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            implementation: implementation.into(),
            declaration,
            factory: Arc::new(factory),
        }
    }

    /// Registers a declared implementation with a custom constructor
    pub fn declared(
        implementation: impl Into<String>,
        declaration: impl Into<Declaration>,
        factory: impl Fn() -> Result<Arc<dyn Resource>> + Send + Sync + 'static,
    ) -> Self {
        Self::new(implementation, Some(declaration.into()), factory)
    }

    /// Registers a declared implementation built with [`Default`]
    pub fn of<R>(implementation: impl Into<String>, declaration: impl Into<Declaration>) -> Self
    where
        R: Resource + Default + 'static,
    {
        Self::declared(implementation, declaration, || {
            Ok(Arc::new(R::default()) as Arc<dyn Resource>)
        })
    }

    pub fn implementation(&self) -> &str {
        &self.implementation
    }

    pub fn declaration(&self) -> Option<&Declaration> {
        self.declaration.as_ref()
    }

    /// Creates a new instance of the implementation
    pub fn instantiate(&self) -> Result<Arc<dyn Resource>> {
        (self.factory)()
    }
}

impl fmt::Debug for ResourceRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceRegistration")
            .field("implementation", &self.implementation)
            .field("declaration", &self.declaration)
            .finish_non_exhaustive()
    }
}
