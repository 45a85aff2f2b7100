// restws - REST resource and search dispatcher
// Copyright (c) 2025 restws Contributors
// Licensed under the MIT License

//! # restws - REST resources and search handlers
//!
//! restws maps REST resource names and domain types to resource
//! implementations, and picks the search handler that serves a list request
//! from the parameters the request carries.
//!
//! ## Overview
//!
//! This library provides:
//! - **Registering** resources and search handlers through an explicit
//!   [`core::provider::ComponentProvider`] table
//! - **Filtering** components by the running platform version
//! - **Resolving** resources by name or by domain type, walking supertypes
//! - **Selecting** search handlers from request parameters, with ambiguity
//!   detection
//! - **Rendering** dictionary records in ref, default, full and custom
//!   representations
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Registries, the REST service and request dispatch
//! - [`adapters`] - Built-in resources, search handlers and the data store
//! - [`domain`] - Dictionary records, representations, versions and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust
//! use restws::adapters::resources::default_catalog;
//! use restws::core::request::RequestParameters;
//! use restws::core::service::RestService;
//! use restws::domain::PlatformVersion;
//! use std::sync::Arc;
//!
//! # fn example() -> restws::domain::Result<()> {
//! let service = RestService::new(Arc::new(default_catalog()), PlatformVersion::new("1.9.0")?);
//!
//! // Registries are built on first use, once
//! let _concepts = service.get_resource_by_name("concept")?;
//! let definition = service.resource_registry()?.definition("concept");
//! assert_eq!(
//!     definition.map(|d| d.implementation.as_str()),
//!     Some("ConceptResource1_9")
//! );
//!
//! let params: RequestParameters = "?q=pulse".parse()?;
//! let handler = service.get_search_handler("concept", &params)?;
//! assert_eq!(handler.map(|h| h.config().id.clone()), Some("byName".to_string()));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`], whose error type is
//! [`domain::RestError`]. Registry construction failures are fatal for the
//! call that triggered the build and are retried on the next call.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
