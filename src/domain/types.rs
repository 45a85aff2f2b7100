//! Domain type descriptors
//!
//! Resources declare the domain type they handle. Types form a single
//! inheritance chain so that a lookup for a subtype (for example a numeric
//! concept) can fall back to the resource registered for its supertype.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Static descriptor of a domain type and its supertype
///
/// Identity is the type name; two descriptors with the same name are the
/// same type.
#[derive(Debug)]
pub struct DomainType {
    name: &'static str,
    parent: Option<&'static DomainType>,
}

impl DomainType {
    /// Declares a root type
    pub const fn root(name: &'static str) -> Self {
        Self { name, parent: None }
    }

    /// Declares a type extending `parent`
    pub const fn extends(name: &'static str, parent: &'static DomainType) -> Self {
        Self {
            name,
            parent: Some(parent),
        }
    }

    /// Type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Direct supertype, if any
    pub fn parent(&self) -> Option<&'static DomainType> {
        self.parent
    }

    /// Iterates over the supertypes of this type, nearest first
    pub fn ancestors(&self) -> impl Iterator<Item = &'static DomainType> {
        std::iter::successors(self.parent, |t| t.parent)
    }

    /// Returns true if a value of `other` can be used where `self` is expected
    pub fn is_assignable_from(&self, other: &DomainType) -> bool {
        self == other || other.ancestors().any(|ancestor| ancestor == self)
    }
}

impl PartialEq for DomainType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for DomainType {}

impl Hash for DomainType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for DomainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

pub static BASE_OPENMRS_OBJECT: DomainType = DomainType::root("BaseOpenmrsObject");

pub static BASE_OPENMRS_METADATA: DomainType =
    DomainType::extends("BaseOpenmrsMetadata", &BASE_OPENMRS_OBJECT);

pub static CONCEPT: DomainType = DomainType::extends("Concept", &BASE_OPENMRS_OBJECT);

pub static CONCEPT_NUMERIC: DomainType = DomainType::extends("ConceptNumeric", &CONCEPT);

pub static CONCEPT_COMPLEX: DomainType = DomainType::extends("ConceptComplex", &CONCEPT);

pub static CONCEPT_CLASS: DomainType =
    DomainType::extends("ConceptClass", &BASE_OPENMRS_METADATA);

pub static CONCEPT_MAP: DomainType = DomainType::extends("ConceptMap", &BASE_OPENMRS_OBJECT);

pub static PERSON_ATTRIBUTE_TYPE: DomainType =
    DomainType::extends("PersonAttributeType", &BASE_OPENMRS_METADATA);
