//! Domain models and types for restws.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Domain type descriptors** ([`DomainType`]) with supertype chains
//! - **Dictionary records** ([`Concept`], [`ConceptClass`], [`ConceptMap`],
//!   [`PersonAttributeType`])
//! - **Representations** ([`Representation`], [`CustomRepresentation`])
//! - **Platform versions** ([`PlatformVersion`])
//! - **Error types** ([`RestError`]) and the [`Result`] alias
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, RestError>`]:
//!
//! ```rust
//! use restws::domain::{PlatformVersion, Result};
//!
//! fn example() -> Result<()> {
//!     let version = PlatformVersion::new("1.9.7")?;
//!     assert!(version.supports_any(&["1.9.*"]));
//!     Ok(())
//! }
//! ```

pub mod audit;
pub mod concept;
pub mod errors;
pub mod object;
pub mod person;
pub mod representation;
pub mod result;
pub mod types;
pub mod version;

// Re-export commonly used types for convenience
pub use audit::AuditInfo;
pub use concept::{Concept, ConceptClass, ConceptDatatype, ConceptMap, NumericRange};
pub use errors::RestError;
pub use object::DomainObject;
pub use person::PersonAttributeType;
pub use representation::{CustomRepresentation, Representation, SimpleObject};
pub use result::Result;
pub use types::DomainType;
pub use version::{check_required_version, PlatformVersion};
