//! In-memory data store backed by a JSON dictionary fixture
//!
//! # Fixture format
//!
//! ```json
//! {
//!   "conceptClasses": [{"uuid": "cc-1", "name": "Test"}],
//!   "concepts": [
//!     {"uuid": "c-1", "conceptId": 5089, "name": "Weight (kg)",
//!      "datatype": {"name": "Numeric"}, "conceptClass": "cc-1",
//!      "numeric": {"units": "kg"}}
//!   ],
//!   "conceptMaps": [{"uuid": "m-1", "concept": "c-1", "source": "CIEL", "code": "5089"}],
//!   "personAttributeTypes": [{"uuid": "p-1", "name": "Race"}]
//! }
//! ```

use super::traits::DataStore;
use crate::domain::{
    Concept, ConceptClass, ConceptMap, PersonAttributeType, RestError, Result,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Serialized contents of an [`InMemoryStore`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryFixture {
    #[serde(default)]
    pub concepts: Vec<Concept>,
    #[serde(default)]
    pub concept_classes: Vec<ConceptClass>,
    #[serde(default)]
    pub concept_maps: Vec<ConceptMap>,
    #[serde(default)]
    pub person_attribute_types: Vec<PersonAttributeType>,
}

/// Data store holding all records in memory
#[derive(Debug, Default)]
pub struct InMemoryStore {
    concepts: HashMap<String, Concept>,
    concept_classes: HashMap<String, ConceptClass>,
    concept_maps: HashMap<String, ConceptMap>,
    person_attribute_types: HashMap<String, PersonAttributeType>,
}

impl InMemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a store from a JSON fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid fixture.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            RestError::platform(
                format!("Failed to read dictionary fixture {}", path.display()),
                e,
            )
        })?;
        let fixture: DictionaryFixture = serde_json::from_str(&contents)?;
        let store = Self::from_fixture(fixture);
        tracing::info!(
            path = %path.display(),
            concepts = store.concepts.len(),
            concept_classes = store.concept_classes.len(),
            concept_maps = store.concept_maps.len(),
            person_attribute_types = store.person_attribute_types.len(),
            "Dictionary fixture loaded"
        );
        Ok(store)
    }

    /// Builds a store from fixture contents; later records replace earlier ones with the same uuid
    pub fn from_fixture(fixture: DictionaryFixture) -> Self {
        let mut store = Self::new();
        fixture.concepts.into_iter().for_each(|c| store.insert_concept(c));
        fixture
            .concept_classes
            .into_iter()
            .for_each(|c| store.insert_concept_class(c));
        fixture.concept_maps.into_iter().for_each(|m| store.insert_concept_map(m));
        fixture
            .person_attribute_types
            .into_iter()
            .for_each(|p| store.insert_person_attribute_type(p));
        store
    }

    pub fn insert_concept(&mut self, concept: Concept) {
        self.concepts.insert(concept.uuid.clone(), concept);
    }

    pub fn insert_concept_class(&mut self, class: ConceptClass) {
        self.concept_classes.insert(class.uuid.clone(), class);
    }

    pub fn insert_concept_map(&mut self, map: ConceptMap) {
        self.concept_maps.insert(map.uuid.clone(), map);
    }

    pub fn insert_person_attribute_type(&mut self, attribute_type: PersonAttributeType) {
        self.person_attribute_types
            .insert(attribute_type.uuid.clone(), attribute_type);
    }

    /// Builder-style [`InMemoryStore::insert_concept`]
    pub fn with_concept(mut self, concept: Concept) -> Self {
        self.insert_concept(concept);
        self
    }

    /// Builder-style [`InMemoryStore::insert_concept_class`]
    pub fn with_concept_class(mut self, class: ConceptClass) -> Self {
        self.insert_concept_class(class);
        self
    }

    /// Builder-style [`InMemoryStore::insert_concept_map`]
    pub fn with_concept_map(mut self, map: ConceptMap) -> Self {
        self.insert_concept_map(map);
        self
    }

    /// Builder-style [`InMemoryStore::insert_person_attribute_type`]
    pub fn with_person_attribute_type(mut self, attribute_type: PersonAttributeType) -> Self {
        self.insert_person_attribute_type(attribute_type);
        self
    }
}

fn sorted_by<T: Clone, K: Ord>(values: impl Iterator<Item = T>, key: impl Fn(&T) -> K) -> Vec<T> {
    let mut values: Vec<T> = values.collect();
    values.sort_by_key(|v| key(v));
    values
}

impl DataStore for InMemoryStore {
    fn concept(&self, uuid: &str) -> Result<Option<Concept>> {
        Ok(self.concepts.get(uuid).cloned())
    }

    fn concept_by_id(&self, concept_id: i64) -> Result<Option<Concept>> {
        Ok(self
            .concepts
            .values()
            .find(|c| c.concept_id == Some(concept_id))
            .cloned())
    }

    fn concepts(&self) -> Result<Vec<Concept>> {
        Ok(sorted_by(self.concepts.values().cloned(), |c| {
            (c.name.to_lowercase(), c.uuid.clone())
        }))
    }

    fn concept_class(&self, uuid: &str) -> Result<Option<ConceptClass>> {
        Ok(self.concept_classes.get(uuid).cloned())
    }

    fn concept_classes(&self) -> Result<Vec<ConceptClass>> {
        Ok(sorted_by(self.concept_classes.values().cloned(), |c| {
            (c.name.to_lowercase(), c.uuid.clone())
        }))
    }

    fn concept_map(&self, uuid: &str) -> Result<Option<ConceptMap>> {
        Ok(self.concept_maps.get(uuid).cloned())
    }

    fn concept_maps_for(&self, concept_uuid: &str) -> Result<Vec<ConceptMap>> {
        Ok(sorted_by(
            self.concept_maps
                .values()
                .filter(|m| m.concept == concept_uuid)
                .cloned(),
            |m| (m.source.clone(), m.code.clone()),
        ))
    }

    fn concept_maps(&self) -> Result<Vec<ConceptMap>> {
        Ok(sorted_by(self.concept_maps.values().cloned(), |m| {
            (m.source.clone(), m.code.clone())
        }))
    }

    fn person_attribute_type(&self, uuid: &str) -> Result<Option<PersonAttributeType>> {
        Ok(self.person_attribute_types.get(uuid).cloned())
    }

    fn person_attribute_types(&self) -> Result<Vec<PersonAttributeType>> {
        Ok(sorted_by(self.person_attribute_types.values().cloned(), |p| {
            (p.name.to_lowercase(), p.uuid.clone())
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_concepts_sorted_by_name() {
        let store = InMemoryStore::new()
            .with_concept(Concept::new("c2", "weight", "Numeric"))
            .with_concept(Concept::new("c1", "Height", "Numeric"));
        let names: Vec<_> = store.concepts().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Height", "weight"]);
    }

    #[test]
    fn test_concept_by_id() {
        let mut concept = Concept::new("c1", "Civil status", "Coded");
        concept.concept_id = Some(1054);
        let store = InMemoryStore::new().with_concept(concept);
        assert_eq!(store.concept_by_id(1054).unwrap().unwrap().uuid, "c1");
        assert!(store.concept_by_id(1).unwrap().is_none());
    }

    #[test]
    fn test_load_fixture() {
        let fixture = r#"{
            "conceptClasses": [{"uuid": "cc-1", "name": "Test"}],
            "concepts": [{"uuid": "c-1", "name": "Weight", "datatype": {"name": "Numeric"}}],
            "conceptMaps": [{"uuid": "m-1", "concept": "c-1", "source": "CIEL", "code": "5089"}]
        }"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(fixture.as_bytes()).unwrap();
        file.flush().unwrap();

        let store = InMemoryStore::load(file.path()).unwrap();
        assert!(store.concept("c-1").unwrap().is_some());
        assert_eq!(store.concept_maps_for("c-1").unwrap().len(), 1);
        assert!(store.person_attribute_types().unwrap().is_empty());
    }

    #[test]
    fn test_load_missing_file_is_platform_error() {
        let err = InMemoryStore::load("does-not-exist.json").unwrap_err();
        assert!(matches!(err, RestError::Platform { .. }));
    }
}
