//! Concept class resource

use super::support::{base_object, links_last, render, Detail};
use crate::adapters::store::DataStore;
use crate::core::resource::{
    RepresentationContext, Resource, ResourceDeclaration, ResourceRegistration,
};
use crate::domain::types::CONCEPT_CLASS;
use crate::domain::{ConceptClass, DomainObject, Representation, RestError, Result, SimpleObject};
use serde_json::{json, Value};

pub const CONCEPT_CLASS_PATH: &str = "conceptclass";

#[derive(Debug, Clone, Copy, Default)]
pub struct ConceptClassResource;

impl ConceptClassResource {
    pub fn registration() -> ResourceRegistration {
        ResourceRegistration::of::<ConceptClassResource>(
            "ConceptClassResource1_8",
            ResourceDeclaration::new(CONCEPT_CLASS_PATH, &CONCEPT_CLASS)
                .with_platform_versions(["1.8.* - 9.*"]),
        )
    }

    fn build(&self, class: &ConceptClass, detail: Detail) -> SimpleObject {
        let mut object = base_object(CONCEPT_CLASS_PATH, &class.uuid, &class.name);
        if detail == Detail::Ref {
            return object;
        }

        object.insert("name".to_string(), Value::from(class.name.as_str()));
        object.insert("description".to_string(), json!(class.description));
        object.insert("retired".to_string(), Value::Bool(class.retired));
        if detail == Detail::Full {
            if class.retired {
                object.insert("retireReason".to_string(), json!(class.retire_reason));
            }
            object.insert("auditInfo".to_string(), class.audit_info.to_value());
        }
        links_last(object)
    }
}

impl Resource for ConceptClassResource {
    fn represent(
        &self,
        object: &DomainObject,
        representation: &Representation,
        _ctx: &RepresentationContext<'_>,
    ) -> Result<SimpleObject> {
        let DomainObject::ConceptClass(class) = object else {
            return Err(RestError::UnsupportedOperation(format!(
                "The '{CONCEPT_CLASS_PATH}' resource cannot represent a {}",
                object.domain_type()
            )));
        };
        render(CONCEPT_CLASS_PATH, representation, |detail| {
            Ok(self.build(class, detail))
        })
    }

    fn retrieve(
        &self,
        uuid: &str,
        _parent: Option<&str>,
        store: &dyn DataStore,
    ) -> Result<DomainObject> {
        store
            .concept_class(uuid)?
            .map(DomainObject::from)
            .ok_or_else(|| RestError::ObjectNotFound(format!("concept class {uuid}")))
    }

    fn list(&self, _parent: Option<&str>, store: &dyn DataStore) -> Result<Vec<DomainObject>> {
        Ok(store
            .concept_classes()?
            .into_iter()
            .filter(|class| !class.retired)
            .map(DomainObject::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::InMemoryStore;

    #[test]
    fn test_audit_info_only_in_full() {
        let store = InMemoryStore::new().with_concept_class(ConceptClass::new("c1", "Test"));
        let object = ConceptClassResource.retrieve("c1", None, &store).unwrap();
        let ctx = RepresentationContext::new(&store, 8);

        let default = ConceptClassResource
            .represent(&object, &Representation::Default, &ctx)
            .unwrap();
        assert!(default.get("auditInfo").is_none());
        assert_eq!(default["name"], "Test");

        let full = ConceptClassResource
            .represent(&object, &Representation::Full, &ctx)
            .unwrap();
        assert!(full.get("auditInfo").is_some());
    }

    #[test]
    fn test_list_skips_retired() {
        let mut retired = ConceptClass::new("c2", "Old");
        retired.retired = true;
        let store = InMemoryStore::new()
            .with_concept_class(ConceptClass::new("c1", "Test"))
            .with_concept_class(retired);
        let listed = ConceptClassResource.list(None, &store).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].uuid(), "c1");
    }
}
