//! Built-in REST resources
//!
//! Each resource module exposes its registrations; [`default_catalog`]
//! collects them together with the built-in search handlers.

pub mod concept;
pub mod concept_class;
pub mod concept_map;
pub mod person_attribute_type;
pub mod support;

pub use concept::{ConceptResource, SetMemberStyle};
pub use concept_class::ConceptClassResource;
pub use concept_map::ConceptMapResource;
pub use person_attribute_type::PersonAttributeTypeResource;

use crate::core::provider::Catalog;

/// Catalog of every built-in resource and search handler
pub fn default_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog
        .register_resource(ConceptResource::registration_1_8())
        .register_resource(ConceptResource::registration_1_9())
        .register_resource(ConceptClassResource::registration())
        .register_resource(PersonAttributeTypeResource::registration());
    for registration in ConceptMapResource::registrations() {
        catalog.register_resource(registration);
    }
    for handler in super::search::search_handlers() {
        catalog.register_search_handler(handler);
    }
    catalog
}
