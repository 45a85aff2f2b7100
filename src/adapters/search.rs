//! Built-in search handlers
//!
//! Name matching is a case-insensitive substring match. Retired records are
//! only returned when the request carries `includeAll`.

use crate::adapters::resources::concept::CONCEPT_PATH;
use crate::adapters::resources::concept_class::CONCEPT_CLASS_PATH;
use crate::adapters::resources::person_attribute_type::PERSON_ATTRIBUTE_TYPE_PATH;
use crate::adapters::store::DataStore;
use crate::core::constants::REQUEST_PROPERTY_FOR_INCLUDE_ALL;
use crate::core::request::RequestParameters;
use crate::core::search::{SearchConfig, SearchHandler};
use crate::domain::{DomainObject, RestError, Result};
use std::collections::BTreeSet;
use std::sync::Arc;

const QUERY: &str = "q";

/// Every built-in search handler
pub fn search_handlers() -> Vec<Arc<dyn SearchHandler>> {
    vec![
        Arc::new(ConceptByNameSearch::default()),
        Arc::new(ConceptByClassSearch::default()),
        Arc::new(ConceptByCodeSearch::default()),
        Arc::new(ConceptClassSearch::default()),
        Arc::new(PersonAttributeTypeSearch::default()),
    ]
}

fn required<'a>(parameters: &'a RequestParameters, name: &str) -> Result<&'a str> {
    parameters
        .get(name)
        .ok_or_else(|| RestError::Validation(format!("Missing required parameter '{name}'")))
}

fn name_matches(name: &str, query: Option<&str>) -> bool {
    match query.map(str::trim) {
        None | Some("") => true,
        Some(query) => name.to_lowercase().contains(&query.to_lowercase()),
    }
}

fn include_retired(parameters: &RequestParameters) -> bool {
    parameters
        .get(REQUEST_PROPERTY_FOR_INCLUDE_ALL)
        .is_some_and(|value| !value.eq_ignore_ascii_case("false"))
}

/// `concept?q=<name>`
#[derive(Debug)]
pub struct ConceptByNameSearch {
    config: SearchConfig,
}

impl Default for ConceptByNameSearch {
    fn default() -> Self {
        Self {
            config: SearchConfig::new("byName", CONCEPT_PATH)
                .with_platform_versions(["1.8.* - 9.*"])
                .with_required([QUERY])
                .with_description("Concepts whose name contains q"),
        }
    }
}

impl SearchHandler for ConceptByNameSearch {
    fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn search(
        &self,
        parameters: &RequestParameters,
        store: &dyn DataStore,
    ) -> Result<Vec<DomainObject>> {
        let query = required(parameters, QUERY)?;
        let retired = include_retired(parameters);
        Ok(store
            .concepts()?
            .into_iter()
            .filter(|concept| retired || !concept.retired)
            .filter(|concept| name_matches(&concept.name, Some(query)))
            .map(DomainObject::from)
            .collect())
    }
}

/// `concept?class=<name or uuid>[&q=<name>]`
#[derive(Debug)]
pub struct ConceptByClassSearch {
    config: SearchConfig,
}

impl Default for ConceptByClassSearch {
    fn default() -> Self {
        Self {
            config: SearchConfig::new("byClass", CONCEPT_PATH)
                .with_platform_versions(["1.8.* - 9.*"])
                .with_required(["class"])
                .with_optional([QUERY])
                .with_description("Concepts of a class, optionally filtered by name"),
        }
    }
}

impl SearchHandler for ConceptByClassSearch {
    fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn search(
        &self,
        parameters: &RequestParameters,
        store: &dyn DataStore,
    ) -> Result<Vec<DomainObject>> {
        let class = required(parameters, "class")?;
        let class_uuids: BTreeSet<String> = store
            .concept_classes()?
            .into_iter()
            .filter(|c| c.uuid == class || c.name.eq_ignore_ascii_case(class))
            .map(|c| c.uuid)
            .collect();
        if class_uuids.is_empty() {
            tracing::debug!(class, "No concept class matches the search");
            return Ok(Vec::new());
        }

        let query = parameters.get(QUERY);
        let retired = include_retired(parameters);
        Ok(store
            .concepts()?
            .into_iter()
            .filter(|concept| retired || !concept.retired)
            .filter(|concept| {
                concept
                    .concept_class
                    .as_ref()
                    .is_some_and(|uuid| class_uuids.contains(uuid))
            })
            .filter(|concept| name_matches(&concept.name, query))
            .map(DomainObject::from)
            .collect())
    }
}

/// `concept?code=<code>[&source=<source>]`
#[derive(Debug)]
pub struct ConceptByCodeSearch {
    config: SearchConfig,
}

impl Default for ConceptByCodeSearch {
    fn default() -> Self {
        Self {
            config: SearchConfig::new("byCode", CONCEPT_PATH)
                .with_platform_versions(["1.9.* - 9.*"])
                .with_required(["code"])
                .with_optional(["source"])
                .with_description("Concepts mapped to a code, optionally in one source"),
        }
    }
}

impl SearchHandler for ConceptByCodeSearch {
    fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn search(
        &self,
        parameters: &RequestParameters,
        store: &dyn DataStore,
    ) -> Result<Vec<DomainObject>> {
        let code = required(parameters, "code")?;
        let source = parameters.get("source");
        let mapped: BTreeSet<String> = store
            .concept_maps()?
            .into_iter()
            .filter(|map| map.code.eq_ignore_ascii_case(code))
            .filter(|map| source.map_or(true, |s| map.source.eq_ignore_ascii_case(s)))
            .map(|map| map.concept)
            .collect();

        let retired = include_retired(parameters);
        Ok(store
            .concepts()?
            .into_iter()
            .filter(|concept| mapped.contains(&concept.uuid))
            .filter(|concept| retired || !concept.retired)
            .map(DomainObject::from)
            .collect())
    }
}

/// `conceptclass?q=<name>`
#[derive(Debug)]
pub struct ConceptClassSearch {
    config: SearchConfig,
}

impl Default for ConceptClassSearch {
    fn default() -> Self {
        Self {
            config: SearchConfig::new("default", CONCEPT_CLASS_PATH)
                .with_required([QUERY])
                .with_description("Concept classes whose name contains q"),
        }
    }
}

impl SearchHandler for ConceptClassSearch {
    fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn search(
        &self,
        parameters: &RequestParameters,
        store: &dyn DataStore,
    ) -> Result<Vec<DomainObject>> {
        let query = required(parameters, QUERY)?;
        let retired = include_retired(parameters);
        Ok(store
            .concept_classes()?
            .into_iter()
            .filter(|class| retired || !class.retired)
            .filter(|class| name_matches(&class.name, Some(query)))
            .map(DomainObject::from)
            .collect())
    }
}

/// `personattributetype?q=<name>`
#[derive(Debug)]
pub struct PersonAttributeTypeSearch {
    config: SearchConfig,
}

impl Default for PersonAttributeTypeSearch {
    fn default() -> Self {
        Self {
            config: SearchConfig::new("default", PERSON_ATTRIBUTE_TYPE_PATH)
                .with_required([QUERY])
                .with_description("Person attribute types whose name contains q"),
        }
    }
}

impl SearchHandler for PersonAttributeTypeSearch {
    fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn search(
        &self,
        parameters: &RequestParameters,
        store: &dyn DataStore,
    ) -> Result<Vec<DomainObject>> {
        let query = required(parameters, QUERY)?;
        let retired = include_retired(parameters);
        Ok(store
            .person_attribute_types()?
            .into_iter()
            .filter(|attribute_type| retired || !attribute_type.retired)
            .filter(|attribute_type| name_matches(&attribute_type.name, Some(query)))
            .map(DomainObject::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::InMemoryStore;
    use crate::domain::{Concept, ConceptClass, ConceptMap};

    fn store() -> InMemoryStore {
        let mut pulse = Concept::new("pulse", "Pulse", "Numeric");
        pulse.concept_class = Some("test".to_string());
        let mut old_pulse = Concept::new("old", "Pulse (old)", "Numeric");
        old_pulse.retired = true;
        let mut malaria = Concept::new("malaria", "Malaria", "N/A");
        malaria.concept_class = Some("diagnosis".to_string());
        InMemoryStore::new()
            .with_concept(pulse)
            .with_concept(old_pulse)
            .with_concept(malaria)
            .with_concept_class(ConceptClass::new("test", "Test"))
            .with_concept_class(ConceptClass::new("diagnosis", "Diagnosis"))
            .with_concept_map(ConceptMap {
                uuid: "m1".to_string(),
                concept: "malaria".to_string(),
                source: "ICD-10-WHO".to_string(),
                code: "B54".to_string(),
                map_type: None,
            })
    }

    fn uuids(objects: Vec<DomainObject>) -> Vec<String> {
        objects.iter().map(|o| o.uuid().to_string()).collect()
    }

    #[test]
    fn test_by_name_is_case_insensitive_and_skips_retired() {
        let params = RequestParameters::new().with("q", "PULSE");
        let found = ConceptByNameSearch::default().search(&params, &store()).unwrap();
        assert_eq!(uuids(found), vec!["pulse"]);

        let params = params.with("includeAll", "true");
        let found = ConceptByNameSearch::default().search(&params, &store()).unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_by_class_accepts_name_or_uuid() {
        let handler = ConceptByClassSearch::default();
        let by_name = RequestParameters::new().with("class", "diagnosis");
        assert_eq!(uuids(handler.search(&by_name, &store()).unwrap()), vec!["malaria"]);

        let filtered = RequestParameters::new().with("class", "test").with("q", "mal");
        assert!(handler.search(&filtered, &store()).unwrap().is_empty());
    }

    #[test]
    fn test_by_code_with_source() {
        let handler = ConceptByCodeSearch::default();
        let params = RequestParameters::new().with("code", "b54");
        assert_eq!(uuids(handler.search(&params, &store()).unwrap()), vec!["malaria"]);

        let params = params.with("source", "SNOMED CT");
        assert!(handler.search(&params, &store()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_required_parameter() {
        let result = ConceptClassSearch::default().search(&RequestParameters::new(), &store());
        assert!(matches!(result, Err(RestError::Validation(_))));
    }

    #[test]
    fn test_handler_ids_are_unique_per_resource() {
        let keys: BTreeSet<_> = search_handlers().iter().map(|h| h.config().key()).collect();
        assert_eq!(keys.len(), search_handlers().len());
    }
}
