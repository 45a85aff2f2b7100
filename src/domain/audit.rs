//! Audit information shared by all persistent domain objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Who created and last changed an object, and when
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditInfo {
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub changed_by: Option<String>,
    #[serde(default)]
    pub date_changed: Option<DateTime<Utc>>,
}

impl AuditInfo {
    /// Serialized form used by full representations
    pub fn to_value(&self) -> Value {
        json!({
            "creator": self.creator,
            "dateCreated": self.date_created.map(|d| d.to_rfc3339()),
            "changedBy": self.changed_by,
            "dateChanged": self.date_changed.map(|d| d.to_rfc3339()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_to_value() {
        let audit = AuditInfo {
            creator: Some("admin".to_string()),
            date_created: Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()),
            changed_by: None,
            date_changed: None,
        };
        let value = audit.to_value();
        assert_eq!(value["creator"], "admin");
        assert_eq!(value["dateCreated"], "2024-01-02T03:04:05+00:00");
        assert!(value["changedBy"].is_null());
    }
}
