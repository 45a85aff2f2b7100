//! Any domain object a resource can serve

use super::concept::{Concept, ConceptClass, ConceptMap};
use super::person::PersonAttributeType;
use super::types::DomainType;

/// A domain object returned by a resource or search handler
#[derive(Debug, Clone, PartialEq)]
pub enum DomainObject {
    Concept(Concept),
    ConceptClass(ConceptClass),
    ConceptMap(ConceptMap),
    PersonAttributeType(PersonAttributeType),
}

impl DomainObject {
    pub fn uuid(&self) -> &str {
        match self {
            DomainObject::Concept(c) => &c.uuid,
            DomainObject::ConceptClass(c) => &c.uuid,
            DomainObject::ConceptMap(m) => &m.uuid,
            DomainObject::PersonAttributeType(p) => &p.uuid,
        }
    }

    /// Concrete domain type, used to find the resource that represents it
    pub fn domain_type(&self) -> &'static DomainType {
        match self {
            DomainObject::Concept(c) => c.domain_type(),
            DomainObject::ConceptClass(c) => c.domain_type(),
            DomainObject::ConceptMap(m) => m.domain_type(),
            DomainObject::PersonAttributeType(p) => p.domain_type(),
        }
    }
}

impl From<Concept> for DomainObject {
    fn from(concept: Concept) -> Self {
        DomainObject::Concept(concept)
    }
}

impl From<ConceptClass> for DomainObject {
    fn from(class: ConceptClass) -> Self {
        DomainObject::ConceptClass(class)
    }
}

impl From<ConceptMap> for DomainObject {
    fn from(map: ConceptMap) -> Self {
        DomainObject::ConceptMap(map)
    }
}

impl From<PersonAttributeType> for DomainObject {
    fn from(attribute_type: PersonAttributeType) -> Self {
        DomainObject::PersonAttributeType(attribute_type)
    }
}
