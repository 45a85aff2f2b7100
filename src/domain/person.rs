//! Person attribute type domain model

use super::audit::AuditInfo;
use super::types::{DomainType, PERSON_ATTRIBUTE_TYPE};
use serde::{Deserialize, Serialize};

/// Format value marking attribute types whose values are concepts
pub const CONCEPT_FORMAT: &str = "org.openmrs.Concept";

/// Definition of a person attribute (birthplace, civil status, ...)
///
/// `format` names the type of the attribute values. When it is
/// [`CONCEPT_FORMAT`], `foreign_key` holds the numeric id of the concept whose
/// answers are the allowed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonAttributeType {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub foreign_key: Option<i64>,
    #[serde(default)]
    pub searchable: bool,
    #[serde(default)]
    pub sort_weight: Option<f64>,
    #[serde(default)]
    pub retired: bool,
    #[serde(default)]
    pub audit_info: AuditInfo,
}

impl PersonAttributeType {
    pub fn new(uuid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            description: None,
            format: None,
            foreign_key: None,
            searchable: false,
            sort_weight: None,
            retired: false,
            audit_info: AuditInfo::default(),
        }
    }

    /// True when attribute values are concepts
    pub fn has_concept_format(&self) -> bool {
        self.format.as_deref() == Some(CONCEPT_FORMAT)
    }

    pub fn domain_type(&self) -> &'static DomainType {
        &PERSON_ATTRIBUTE_TYPE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_concept_format() {
        let mut attribute_type = PersonAttributeType::new("p1", "Civil Status");
        assert!(!attribute_type.has_concept_format());
        attribute_type.format = Some("java.lang.String".to_string());
        assert!(!attribute_type.has_concept_format());
        attribute_type.format = Some(CONCEPT_FORMAT.to_string());
        assert!(attribute_type.has_concept_format());
    }
}
