//! Concept resource
//!
//! Two registrations share the `concept` path. The 1.8 variant lists set
//! members as references in every representation. The 1.9 variant renders
//! set members in the full representation at full detail, recursively.
//!
//! Set membership can be cyclic. A member already on the current rendering
//! path, or one nested deeper than the configured maximum, is rendered as a
//! reference, so rendering always terminates.

use super::concept_class::CONCEPT_CLASS_PATH;
use super::concept_map::MAPPING_PATH;
use super::support::{base_object, links_last, reference, render, Detail};
use crate::adapters::store::DataStore;
use crate::core::resource::{
    RepresentationContext, Resource, ResourceDeclaration, ResourceRegistration,
};
use crate::domain::types::CONCEPT;
use crate::domain::{Concept, DomainObject, Representation, RestError, Result, SimpleObject};
use serde_json::{json, Value};
use std::sync::Arc;

pub const CONCEPT_PATH: &str = "concept";

/// How set members appear in the full representation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetMemberStyle {
    /// Always references
    Reference,
    /// Full representations, guarded against cycles and excessive depth
    Nested,
}

/// The `concept` resource
#[derive(Debug, Clone, Copy)]
pub struct ConceptResource {
    set_members: SetMemberStyle,
}

impl ConceptResource {
    pub fn new(set_members: SetMemberStyle) -> Self {
        Self { set_members }
    }

    /// Registration of the variant for 1.8 platforms
    pub fn registration_1_8() -> ResourceRegistration {
        ResourceRegistration::declared(
            "ConceptResource1_8",
            ResourceDeclaration::new(CONCEPT_PATH, &CONCEPT).with_platform_versions(["1.8.*"]),
            || {
                Ok(Arc::new(ConceptResource::new(SetMemberStyle::Reference)) as Arc<dyn Resource>)
            },
        )
    }

    /// Registration of the variant for 1.9 and later platforms
    pub fn registration_1_9() -> ResourceRegistration {
        ResourceRegistration::declared(
            "ConceptResource1_9",
            ResourceDeclaration::new(CONCEPT_PATH, &CONCEPT)
                .with_platform_versions(["1.9.* - 9.*"]),
            || {
                Ok(Arc::new(ConceptResource::new(SetMemberStyle::Nested)) as Arc<dyn Resource>)
            },
        )
    }

    fn build(
        &self,
        concept: &Concept,
        detail: Detail,
        ctx: &RepresentationContext<'_>,
        path: &mut Vec<String>,
    ) -> Result<SimpleObject> {
        let mut object = base_object(CONCEPT_PATH, &concept.uuid, &concept.name);
        if detail == Detail::Ref {
            if concept.retired {
                object.insert("retired".to_string(), Value::Bool(true));
            }
            return Ok(links_last(object));
        }

        object.insert("name".to_string(), Value::from(concept.name.as_str()));
        object.insert(
            "datatype".to_string(),
            json!({ "uuid": concept.datatype.uuid, "display": concept.datatype.name }),
        );
        object.insert("conceptClass".to_string(), self.concept_class(concept, ctx)?);
        object.insert("set".to_string(), Value::Bool(concept.set));
        object.insert("retired".to_string(), Value::Bool(concept.retired));
        if let Some(numeric) = &concept.numeric {
            object.insert("hiNormal".to_string(), json!(numeric.hi_normal));
            object.insert("lowNormal".to_string(), json!(numeric.low_normal));
            object.insert("units".to_string(), json!(numeric.units));
        }

        let members = self.set_members(concept, detail, ctx, path)?;
        object.insert("setMembers".to_string(), Value::Array(members));

        let mappings = ctx
            .store
            .concept_maps_for(&concept.uuid)?
            .iter()
            .map(|map| {
                let path = format!("{CONCEPT_PATH}/{}/{MAPPING_PATH}", map.concept);
                let mut mapping = base_object(&path, &map.uuid, &map.display());
                if detail == Detail::Full {
                    mapping.insert("source".to_string(), Value::from(map.source.as_str()));
                    mapping.insert("code".to_string(), Value::from(map.code.as_str()));
                    mapping.insert("mapType".to_string(), json!(map.map_type));
                }
                Value::Object(links_last(mapping))
            })
            .collect();
        object.insert("mappings".to_string(), Value::Array(mappings));

        if detail == Detail::Full {
            object.insert("auditInfo".to_string(), concept.audit_info.to_value());
        }
        Ok(links_last(object))
    }

    fn concept_class(&self, concept: &Concept, ctx: &RepresentationContext<'_>) -> Result<Value> {
        let Some(class_uuid) = &concept.concept_class else {
            return Ok(Value::Null);
        };
        Ok(match ctx.store.concept_class(class_uuid)? {
            Some(class) => reference(CONCEPT_CLASS_PATH, &class.uuid, &class.name),
            None => {
                tracing::warn!(
                    concept = %concept.uuid,
                    class = %class_uuid,
                    "Concept class not found"
                );
                Value::Null
            }
        })
    }

    fn set_members(
        &self,
        concept: &Concept,
        detail: Detail,
        ctx: &RepresentationContext<'_>,
        path: &mut Vec<String>,
    ) -> Result<Vec<Value>> {
        let nested = detail == Detail::Full && self.set_members == SetMemberStyle::Nested;
        let mut members = Vec::with_capacity(concept.set_members.len());
        for member_uuid in &concept.set_members {
            let Some(member) = ctx.store.concept(member_uuid)? else {
                tracing::warn!(
                    concept = %concept.uuid,
                    member = %member_uuid,
                    "Skipping unknown set member"
                );
                continue;
            };

            let expand = nested && path.len() <= ctx.max_depth && !path.contains(&member.uuid);
            if !expand {
                if nested && path.contains(&member.uuid) {
                    tracing::debug!(
                        concept = %concept.uuid,
                        member = %member.uuid,
                        "Set member already on the rendering path"
                    );
                }
                members.push(reference(CONCEPT_PATH, &member.uuid, &member.name));
                continue;
            }

            path.push(member.uuid.clone());
            let rendered = self.build(&member, Detail::Full, ctx, path);
            path.pop();
            members.push(Value::Object(rendered?));
        }
        Ok(members)
    }
}

impl Default for ConceptResource {
    fn default() -> Self {
        Self::new(SetMemberStyle::Nested)
    }
}

impl Resource for ConceptResource {
    fn represent(
        &self,
        object: &DomainObject,
        representation: &Representation,
        ctx: &RepresentationContext<'_>,
    ) -> Result<SimpleObject> {
        let DomainObject::Concept(concept) = object else {
            return Err(RestError::UnsupportedOperation(format!(
                "The '{CONCEPT_PATH}' resource cannot represent a {}",
                object.domain_type()
            )));
        };
        render(CONCEPT_PATH, representation, |detail| {
            let mut path = vec![concept.uuid.clone()];
            self.build(concept, detail, ctx, &mut path)
        })
    }

    fn retrieve(
        &self,
        uuid: &str,
        _parent: Option<&str>,
        store: &dyn DataStore,
    ) -> Result<DomainObject> {
        store
            .concept(uuid)?
            .map(DomainObject::from)
            .ok_or_else(|| RestError::ObjectNotFound(format!("concept {uuid}")))
    }

    fn list(&self, _parent: Option<&str>, store: &dyn DataStore) -> Result<Vec<DomainObject>> {
        Ok(store
            .concepts()?
            .into_iter()
            .filter(|concept| !concept.retired)
            .map(DomainObject::from)
            .collect())
    }
}
