//! Core registries and request handling for restws.
//!
//! # Modules
//!
//! - [`resource`] - Resource contract, declarations and the resource registry
//! - [`search`] - Search handler contract and the search handler registry
//! - [`provider`] - Sources of registrations ([`provider::Catalog`])
//! - [`service`] - [`service::RestService`], owner of both registries
//! - [`dispatch`] - Retrieve and list requests over the registries
//!
//! # Lookup workflow
//!
//! 1. **Build**: on first use, the service asks its provider for registrations
//!    and builds the registry for the configured platform version
//! 2. **Resolve**: a request names a resource path; search handlers are picked
//!    by explicit `s` id or by the request's parameter names
//! 3. **Render**: each result is represented by the resource registered for
//!    its domain type
//!
//! # Example
//!
//! ```rust
//! use restws::adapters::resources::default_catalog;
//! use restws::core::service::RestService;
//! use restws::domain::PlatformVersion;
//! use std::sync::Arc;
//!
//! # fn example() -> restws::domain::Result<()> {
//! let service = RestService::new(Arc::new(default_catalog()), PlatformVersion::new("1.9.4")?);
//! let concepts = service.get_resource_by_name("concept")?;
//! # let _ = concepts;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod constants;
pub mod dispatch;
pub mod provider;
pub mod request;
pub mod resource;
pub mod search;
pub mod service;
