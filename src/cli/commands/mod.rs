//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod get;
pub mod init;
pub mod query;
pub mod registry;
pub mod runtime;
pub mod validate;
