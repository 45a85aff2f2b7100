//! Integrations behind the core registries.
//!
//! - [`store`] - Data store trait and the in-memory dictionary store
//! - [`resources`] - Built-in resources and the default registration catalog
//! - [`search`] - Built-in search handlers
//!
//! # Example
//!
//! ```rust
//! use restws::adapters::resources::default_catalog;
//! use restws::adapters::store::InMemoryStore;
//! use restws::core::dispatch::{DispatchSettings, RestDispatcher};
//! use restws::core::request::RequestParameters;
//! use restws::core::service::RestService;
//! use restws::domain::{Concept, PlatformVersion};
//! use std::sync::Arc;
//!
//! # fn example() -> restws::domain::Result<()> {
//! let store = InMemoryStore::new().with_concept(Concept::new("c1", "Pulse", "Numeric"));
//! let service = Arc::new(RestService::new(
//!     Arc::new(default_catalog()),
//!     PlatformVersion::new("1.9.4")?,
//! ));
//! let dispatcher = RestDispatcher::new(service, Arc::new(store), DispatchSettings::default());
//!
//! let body = dispatcher.list("concept", None, &"q=pul".parse::<RequestParameters>()?)?;
//! assert_eq!(body["results"][0]["display"], "Pulse");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod resources;
pub mod search;
pub mod store;
