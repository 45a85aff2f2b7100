//! Concept mapping sub-resource, `concept/{uuid}/mapping`

use super::concept::CONCEPT_PATH;
use super::support::{base_object, links_last, reference, render, Detail};
use crate::adapters::store::DataStore;
use crate::core::resource::{
    RepresentationContext, Resource, ResourceRegistration, SubResourceDeclaration,
};
use crate::domain::types::CONCEPT_MAP;
use crate::domain::{ConceptMap, DomainObject, Representation, RestError, Result, SimpleObject};
use serde_json::{json, Value};

pub const MAPPING_PATH: &str = "mapping";

const RESOURCE_NAME: &str = "concept/mapping";

/// Mappings of one concept to external terminology codes
#[derive(Debug, Clone, Copy, Default)]
pub struct ConceptMapResource;

impl ConceptMapResource {
    /// One registration under each concept variant; each inherits its parent's versions
    pub fn registrations() -> [ResourceRegistration; 2] {
        ["1_8", "1_9"].map(|variant| {
            ResourceRegistration::of::<ConceptMapResource>(
                format!("ConceptMapResource{variant}"),
                SubResourceDeclaration::new(
                    format!("ConceptResource{variant}"),
                    MAPPING_PATH,
                    &CONCEPT_MAP,
                ),
            )
        })
    }

    fn build(
        &self,
        map: &ConceptMap,
        detail: Detail,
        ctx: &RepresentationContext<'_>,
    ) -> Result<SimpleObject> {
        let path = format!("{CONCEPT_PATH}/{}/{MAPPING_PATH}", map.concept);
        let mut object = base_object(&path, &map.uuid, &map.display());
        if detail == Detail::Ref {
            return Ok(object);
        }

        object.insert("source".to_string(), Value::from(map.source.as_str()));
        object.insert("code".to_string(), Value::from(map.code.as_str()));
        object.insert("mapType".to_string(), json!(map.map_type));
        if detail == Detail::Full {
            let concept = match ctx.store.concept(&map.concept)? {
                Some(concept) => reference(CONCEPT_PATH, &concept.uuid, &concept.name),
                None => Value::Null,
            };
            object.insert("concept".to_string(), concept);
        }
        Ok(links_last(object))
    }
}

fn require_parent(parent: Option<&str>) -> Result<&str> {
    parent.ok_or_else(|| {
        RestError::Validation(format!(
            "The '{RESOURCE_NAME}' resource requires a parent concept uuid"
        ))
    })
}

impl Resource for ConceptMapResource {
    fn represent(
        &self,
        object: &DomainObject,
        representation: &Representation,
        ctx: &RepresentationContext<'_>,
    ) -> Result<SimpleObject> {
        let DomainObject::ConceptMap(map) = object else {
            return Err(RestError::UnsupportedOperation(format!(
                "The '{RESOURCE_NAME}' resource cannot represent a {}",
                object.domain_type()
            )));
        };
        render(RESOURCE_NAME, representation, |detail| self.build(map, detail, ctx))
    }

    fn retrieve(
        &self,
        uuid: &str,
        parent: Option<&str>,
        store: &dyn DataStore,
    ) -> Result<DomainObject> {
        let parent = require_parent(parent)?;
        store
            .concept_map(uuid)?
            .filter(|map| map.concept == parent)
            .map(DomainObject::from)
            .ok_or_else(|| {
                RestError::ObjectNotFound(format!("mapping {uuid} of concept {parent}"))
            })
    }

    fn list(&self, parent: Option<&str>, store: &dyn DataStore) -> Result<Vec<DomainObject>> {
        let parent = require_parent(parent)?;
        if store.concept(parent)?.is_none() {
            return Err(RestError::ObjectNotFound(format!("concept {parent}")));
        }
        Ok(store
            .concept_maps_for(parent)?
            .into_iter()
            .map(DomainObject::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::InMemoryStore;
    use crate::domain::Concept;

    fn store() -> InMemoryStore {
        InMemoryStore::new()
            .with_concept(Concept::new("pulse", "Pulse", "Numeric"))
            .with_concept_map(ConceptMap {
                uuid: "m1".to_string(),
                concept: "pulse".to_string(),
                source: "CIEL".to_string(),
                code: "5087".to_string(),
                map_type: None,
            })
    }

    #[test]
    fn test_list_requires_parent() {
        let result = ConceptMapResource.list(None, &store());
        assert!(matches!(result, Err(RestError::Validation(_))));
    }

    #[test]
    fn test_list_unknown_parent() {
        let result = ConceptMapResource.list(Some("nope"), &store());
        assert!(matches!(result, Err(RestError::ObjectNotFound(_))));
    }

    #[test]
    fn test_retrieve_checks_parent() {
        let store = store();
        assert!(ConceptMapResource.retrieve("m1", Some("pulse"), &store).is_ok());
        assert!(matches!(
            ConceptMapResource.retrieve("m1", Some("other"), &store),
            Err(RestError::ObjectNotFound(_))
        ));
    }

    #[test]
    fn test_full_representation_links_concept() {
        let store = store();
        let object = ConceptMapResource.retrieve("m1", Some("pulse"), &store).unwrap();
        let ctx = RepresentationContext::new(&store, 8);
        let rendered = ConceptMapResource
            .represent(&object, &Representation::Full, &ctx)
            .unwrap();
        assert_eq!(rendered["display"], "CIEL: 5087");
        assert_eq!(rendered["concept"]["uuid"], "pulse");
        assert_eq!(
            rendered["links"][0]["uri"],
            "/ws/rest/v1/concept/pulse/mapping/m1"
        );
    }
}
