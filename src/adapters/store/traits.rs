//! Data store abstraction
//!
//! Resources and search handlers read dictionary records through this trait.
//! Lookups that find nothing return `Ok(None)`; errors are reserved for a
//! store that cannot be read.

use crate::domain::{Concept, ConceptClass, ConceptMap, PersonAttributeType, Result};

/// Read access to the concept dictionary and person metadata
pub trait DataStore: Send + Sync {
    /// Get a concept by uuid
    fn concept(&self, uuid: &str) -> Result<Option<Concept>>;

    /// Get a concept by its numeric id
    fn concept_by_id(&self, concept_id: i64) -> Result<Option<Concept>>;

    /// All concepts, ordered by name
    fn concepts(&self) -> Result<Vec<Concept>>;

    /// Get a concept class by uuid
    fn concept_class(&self, uuid: &str) -> Result<Option<ConceptClass>>;

    /// All concept classes, ordered by name
    fn concept_classes(&self) -> Result<Vec<ConceptClass>>;

    /// Get a concept mapping by uuid
    fn concept_map(&self, uuid: &str) -> Result<Option<ConceptMap>>;

    /// Mappings of one concept
    fn concept_maps_for(&self, concept_uuid: &str) -> Result<Vec<ConceptMap>>;

    /// All concept mappings
    fn concept_maps(&self) -> Result<Vec<ConceptMap>>;

    /// Get a person attribute type by uuid
    fn person_attribute_type(&self, uuid: &str) -> Result<Option<PersonAttributeType>>;

    /// All person attribute types, ordered by name
    fn person_attribute_types(&self) -> Result<Vec<PersonAttributeType>>;
}
