//! Concept dictionary domain model

use super::audit::AuditInfo;
use super::types::{DomainType, CONCEPT, CONCEPT_CLASS, CONCEPT_MAP, CONCEPT_NUMERIC};
use serde::{Deserialize, Serialize};

/// Datatype of a concept's observations (Numeric, Coded, Text, N/A, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptDatatype {
    #[serde(default)]
    pub uuid: Option<String>,
    pub name: String,
}

impl ConceptDatatype {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: None,
            name: name.into(),
        }
    }
}

/// Normal ranges and units of a numeric concept
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericRange {
    #[serde(default)]
    pub hi_normal: Option<f64>,
    #[serde(default)]
    pub low_normal: Option<f64>,
    #[serde(default)]
    pub units: Option<String>,
}

/// A dictionary concept
///
/// Set membership is stored by uuid, so a concept graph may contain cycles
/// (including a concept listing itself as a member). Consumers walking
/// `set_members` must guard against that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    pub uuid: String,

    /// Numeric primary key, referenced by attribute type foreign keys
    #[serde(default)]
    pub concept_id: Option<i64>,

    pub name: String,

    pub datatype: ConceptDatatype,

    /// Uuid of the concept class
    #[serde(default)]
    pub concept_class: Option<String>,

    #[serde(default)]
    pub set: bool,

    #[serde(default)]
    pub retired: bool,

    /// Uuids of member concepts, in order
    #[serde(default)]
    pub set_members: Vec<String>,

    /// Present for numeric concepts
    #[serde(default)]
    pub numeric: Option<NumericRange>,

    #[serde(default)]
    pub audit_info: AuditInfo,
}

impl Concept {
    /// Creates a non-set concept with the given datatype
    pub fn new(uuid: impl Into<String>, name: impl Into<String>, datatype: &str) -> Self {
        Self {
            uuid: uuid.into(),
            concept_id: None,
            name: name.into(),
            datatype: ConceptDatatype::new(datatype),
            concept_class: None,
            set: false,
            retired: false,
            set_members: Vec::new(),
            numeric: None,
            audit_info: AuditInfo::default(),
        }
    }

    /// Appends a member and marks this concept as a set
    pub fn add_set_member(&mut self, member_uuid: impl Into<String>) {
        self.set = true;
        self.set_members.push(member_uuid.into());
    }

    /// Concrete domain type: numeric concepts are `ConceptNumeric`
    pub fn domain_type(&self) -> &'static DomainType {
        if self.numeric.is_some() {
            &CONCEPT_NUMERIC
        } else {
            &CONCEPT
        }
    }
}

/// Classification of concepts (Test, Diagnosis, ConvSet, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptClass {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub retired: bool,
    #[serde(default)]
    pub retire_reason: Option<String>,
    #[serde(default)]
    pub audit_info: AuditInfo,
}

impl ConceptClass {
    pub fn new(uuid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            description: None,
            retired: false,
            retire_reason: None,
            audit_info: AuditInfo::default(),
        }
    }

    pub fn domain_type(&self) -> &'static DomainType {
        &CONCEPT_CLASS
    }
}

/// Mapping of a concept to a code in an external terminology source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptMap {
    pub uuid: String,
    /// Uuid of the mapped concept
    pub concept: String,
    /// Terminology source name, e.g. `SNOMED CT`
    pub source: String,
    pub code: String,
    #[serde(default)]
    pub map_type: Option<String>,
}

impl ConceptMap {
    pub fn domain_type(&self) -> &'static DomainType {
        &CONCEPT_MAP
    }

    /// Display string, `source: code`
    pub fn display(&self) -> String {
        format!("{}: {}", self.source, self.code)
    }
}
