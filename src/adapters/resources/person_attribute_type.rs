//! Person attribute type resource

use super::concept::CONCEPT_PATH;
use super::support::{base_object, links_last, reference, render, Detail};
use crate::adapters::store::DataStore;
use crate::core::resource::{
    RepresentationContext, Resource, ResourceDeclaration, ResourceRegistration,
};
use crate::domain::types::PERSON_ATTRIBUTE_TYPE;
use crate::domain::{
    Concept, DomainObject, PersonAttributeType, Representation, RestError, Result, SimpleObject,
};
use serde_json::{json, Value};

pub const PERSON_ATTRIBUTE_TYPE_PATH: &str = "personattributetype";

#[derive(Debug, Clone, Copy, Default)]
pub struct PersonAttributeTypeResource;

impl PersonAttributeTypeResource {
    pub fn registration() -> ResourceRegistration {
        ResourceRegistration::of::<PersonAttributeTypeResource>(
            "PersonAttributeTypeResource1_8",
            ResourceDeclaration::new(PERSON_ATTRIBUTE_TYPE_PATH, &PERSON_ATTRIBUTE_TYPE)
                .with_platform_versions(["1.8.* - 9.*"]),
        )
    }

    /// Concept whose answers are the allowed attribute values
    ///
    /// Only attribute types with the concept format have one; it is looked up
    /// by the numeric foreign key.
    pub fn get_concept(
        &self,
        attribute_type: &PersonAttributeType,
        store: &dyn DataStore,
    ) -> Result<Option<Concept>> {
        if !attribute_type.has_concept_format() {
            return Ok(None);
        }
        match attribute_type.foreign_key {
            Some(concept_id) => store.concept_by_id(concept_id),
            None => Ok(None),
        }
    }

    fn build(
        &self,
        attribute_type: &PersonAttributeType,
        detail: Detail,
        ctx: &RepresentationContext<'_>,
    ) -> Result<SimpleObject> {
        let mut object = base_object(
            PERSON_ATTRIBUTE_TYPE_PATH,
            &attribute_type.uuid,
            &attribute_type.name,
        );
        if detail == Detail::Ref {
            return Ok(object);
        }

        object.insert("name".to_string(), Value::from(attribute_type.name.as_str()));
        object.insert("description".to_string(), json!(attribute_type.description));
        object.insert("format".to_string(), json!(attribute_type.format));
        object.insert("foreignKey".to_string(), json!(attribute_type.foreign_key));
        object.insert("sortWeight".to_string(), json!(attribute_type.sort_weight));
        object.insert("searchable".to_string(), Value::Bool(attribute_type.searchable));
        object.insert("retired".to_string(), Value::Bool(attribute_type.retired));
        let concept = self
            .get_concept(attribute_type, ctx.store)?
            .map(|concept| reference(CONCEPT_PATH, &concept.uuid, &concept.name))
            .unwrap_or(Value::Null);
        object.insert("concept".to_string(), concept);
        if detail == Detail::Full {
            object.insert("auditInfo".to_string(), attribute_type.audit_info.to_value());
        }
        Ok(links_last(object))
    }
}

impl Resource for PersonAttributeTypeResource {
    fn represent(
        &self,
        object: &DomainObject,
        representation: &Representation,
        ctx: &RepresentationContext<'_>,
    ) -> Result<SimpleObject> {
        let DomainObject::PersonAttributeType(attribute_type) = object else {
            return Err(RestError::UnsupportedOperation(format!(
                "The '{PERSON_ATTRIBUTE_TYPE_PATH}' resource cannot represent a {}",
                object.domain_type()
            )));
        };
        render(PERSON_ATTRIBUTE_TYPE_PATH, representation, |detail| {
            self.build(attribute_type, detail, ctx)
        })
    }

    fn retrieve(
        &self,
        uuid: &str,
        _parent: Option<&str>,
        store: &dyn DataStore,
    ) -> Result<DomainObject> {
        store
            .person_attribute_type(uuid)?
            .map(DomainObject::from)
            .ok_or_else(|| RestError::ObjectNotFound(format!("person attribute type {uuid}")))
    }

    fn list(&self, _parent: Option<&str>, store: &dyn DataStore) -> Result<Vec<DomainObject>> {
        Ok(store
            .person_attribute_types()?
            .into_iter()
            .filter(|attribute_type| !attribute_type.retired)
            .map(DomainObject::from)
            .collect())
    }
}
