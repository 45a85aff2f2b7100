//! Representation selection
//!
//! A representation is a projection policy deciding which fields of a domain
//! object are serialized. Clients select one with a short token (the `v`
//! request parameter).

use super::errors::RestError;
use super::result::Result;
use serde_json::{Map, Value};
use std::fmt;

/// Serialized form of a domain object
pub type SimpleObject = Map<String, Value>;

pub const REPRESENTATION_REF: &str = "ref";
pub const REPRESENTATION_DEFAULT: &str = "default";
pub const REPRESENTATION_FULL: &str = "full";
pub const REPRESENTATION_CUSTOM_PREFIX: &str = "custom:";

/// Requested representation of a resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Representation {
    /// Minimal reference: uuid, display and links
    Ref,
    /// Default set of fields
    Default,
    /// All fields, including audit information
    Full,
    /// A representation the resource defines under this name
    Named(String),
    /// Client-selected field projection
    Custom(CustomRepresentation),
}

impl Representation {
    /// Maps a requested token to a representation
    ///
    /// Empty or absent input selects [`Representation::Default`]. Tokens
    /// prefixed with `custom:` are parsed into a field projection; any other
    /// unrecognized token is a named representation.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Validation`] if a custom field list is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use restws::domain::Representation;
    ///
    /// assert_eq!(Representation::parse(None).unwrap(), Representation::Default);
    /// assert_eq!(Representation::parse(Some("full")).unwrap(), Representation::Full);
    /// assert_eq!(
    ///     Representation::parse(Some("xyz")).unwrap(),
    ///     Representation::Named("xyz".to_string())
    /// );
    /// ```
    pub fn parse(requested: Option<&str>) -> Result<Self> {
        let requested = match requested {
            Some(r) if !r.is_empty() => r,
            _ => return Ok(Representation::Default),
        };

        Ok(match requested {
            REPRESENTATION_REF => Representation::Ref,
            REPRESENTATION_DEFAULT => Representation::Default,
            REPRESENTATION_FULL => Representation::Full,
            custom if custom.starts_with(REPRESENTATION_CUSTOM_PREFIX) => {
                Representation::Custom(CustomRepresentation::parse(
                    &custom[REPRESENTATION_CUSTOM_PREFIX.len()..],
                )?)
            }
            named => Representation::Named(named.to_string()),
        })
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Representation::Ref => f.write_str(REPRESENTATION_REF),
            Representation::Default => f.write_str(REPRESENTATION_DEFAULT),
            Representation::Full => f.write_str(REPRESENTATION_FULL),
            Representation::Named(name) => f.write_str(name),
            Representation::Custom(custom) => {
                write!(f, "{REPRESENTATION_CUSTOM_PREFIX}{}", custom.spec)
            }
        }
    }
}

/// A single field of a custom representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomField {
    pub name: String,
    /// Representation of the nested value; `None` keeps the value as it
    /// appears in the full representation
    pub nested: Option<Box<Representation>>,
}

/// Field projection requested with `custom:(field1,field2:(sub),...)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomRepresentation {
    spec: String,
    fields: Vec<CustomField>,
}

impl CustomRepresentation {
    /// Parses a field list, with or without enclosing parentheses
    pub fn parse(spec: &str) -> Result<Self> {
        let spec = spec.trim();
        let fields = parse_fields(spec)?;
        Ok(Self {
            spec: spec.to_string(),
            fields,
        })
    }

    /// The field list as requested
    pub fn spec(&self) -> &str {
        &self.spec
    }

    /// Parsed fields, in request order
    pub fn fields(&self) -> &[CustomField] {
        &self.fields
    }

    /// Names of the top-level fields
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Projects a full representation onto the requested fields
    ///
    /// Fields missing from `full` are omitted. Nested representations apply
    /// to nested objects and to each object of an array. A nested `ref` keeps
    /// the reference fields and a nested custom list recurses. Nested
    /// `default` and `full` keep the value as rendered.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::UnsupportedOperation`] if a field asks for a named
    /// representation.
    pub fn project(&self, full: &SimpleObject) -> Result<SimpleObject> {
        self.ensure_supported()?;
        let mut projected = SimpleObject::new();
        for field in &self.fields {
            let Some(value) = full.get(&field.name) else {
                continue;
            };
            let value = match field.nested.as_deref() {
                None | Some(Representation::Default) | Some(Representation::Full) => value.clone(),
                Some(nested) => project_nested(nested, value)?,
            };
            projected.insert(field.name.clone(), value);
        }
        Ok(projected)
    }

    /// Rejects named representations anywhere in the field tree, even for
    /// fields absent from the object being projected
    fn ensure_supported(&self) -> Result<()> {
        for field in &self.fields {
            match field.nested.as_deref() {
                Some(Representation::Named(name)) => return Err(unsupported_named(name)),
                Some(Representation::Custom(nested)) => nested.ensure_supported()?,
                _ => {}
            }
        }
        Ok(())
    }
}

/// Fields kept when a nested value is requested as `ref`
const REF_FIELDS: [&str; 4] = ["uuid", "display", "retired", "links"];

fn project_nested(representation: &Representation, value: &Value) -> Result<Value> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| project_nested(representation, item))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Object(object) => match representation {
            Representation::Custom(custom) => custom.project(object).map(Value::Object),
            Representation::Ref => Ok(Value::Object(
                REF_FIELDS
                    .iter()
                    .filter_map(|key| object.get(*key).map(|v| (key.to_string(), v.clone())))
                    // references flag only retired objects
                    .filter(|(key, v)| key != "retired" || v == &Value::Bool(true))
                    .collect(),
            )),
            Representation::Named(name) => Err(unsupported_named(name)),
            Representation::Default | Representation::Full => Ok(value.clone()),
        },
        other => match representation {
            Representation::Named(name) => Err(unsupported_named(name)),
            _ => Ok(other.clone()),
        },
    }
}

fn unsupported_named(name: &str) -> RestError {
    RestError::UnsupportedOperation(format!(
        "Representation '{name}' is not supported for nested fields"
    ))
}

fn parse_fields(spec: &str) -> Result<Vec<CustomField>> {
    let inner = strip_parens(spec)?;
    let mut fields = Vec::new();
    for part in split_top_level(inner)? {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let field = match part.split_once(':') {
            Some((name, nested)) => CustomField {
                name: name.trim().to_string(),
                nested: Some(Box::new(parse_nested(nested.trim())?)),
            },
            None => CustomField {
                name: part.to_string(),
                nested: None,
            },
        };
        if field.name.is_empty() {
            return Err(RestError::Validation(format!(
                "Custom representation field without a name: '{part}'"
            )));
        }
        fields.push(field);
    }

    if fields.is_empty() {
        return Err(RestError::Validation(format!(
            "Custom representation '{spec}' lists no fields"
        )));
    }
    Ok(fields)
}

fn parse_nested(nested: &str) -> Result<Representation> {
    if nested.starts_with('(') {
        return Ok(Representation::Custom(CustomRepresentation::parse(nested)?));
    }
    Representation::parse(Some(nested))
}

fn strip_parens(spec: &str) -> Result<&str> {
    match (spec.starts_with('('), spec.ends_with(')')) {
        (true, true) => Ok(&spec[1..spec.len() - 1]),
        (false, false) => Ok(spec),
        _ => Err(RestError::Validation(format!(
            "Unbalanced parentheses in custom representation '{spec}'"
        ))),
    }
}

/// Splits on commas that are not inside parentheses
fn split_top_level(spec: &str) -> Result<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in spec.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    RestError::Validation(format!(
                        "Unbalanced parentheses in custom representation '{spec}'"
                    ))
                })?;
            }
            ',' if depth == 0 => {
                parts.push(&spec[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(RestError::Validation(format!(
            "Unbalanced parentheses in custom representation '{spec}'"
        )));
    }
    parts.push(&spec[start..]);
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(None, Representation::Default ; "absent")]
    #[test_case(Some(""), Representation::Default ; "empty")]
    #[test_case(Some("ref"), Representation::Ref ; "reference")]
    #[test_case(Some("default"), Representation::Default ; "default token")]
    #[test_case(Some("full"), Representation::Full ; "full")]
    #[test_case(Some("xyz"), Representation::Named("xyz".to_string()) ; "named")]
    fn test_parse_tokens(requested: Option<&str>, expected: Representation) {
        assert_eq!(Representation::parse(requested).unwrap(), expected);
    }

    #[test]
    fn test_parse_custom_without_parens() {
        let rep = Representation::parse(Some("custom:uuid,display")).unwrap();
        let Representation::Custom(custom) = rep else {
            panic!("expected custom representation");
        };
        assert_eq!(custom.field_names().collect::<Vec<_>>(), vec!["uuid", "display"]);
    }

    #[test]
    fn test_parse_custom_nested() {
        let custom =
            CustomRepresentation::parse("(uuid,conceptClass:ref,setMembers:(uuid,display))")
                .unwrap();
        assert_eq!(custom.fields().len(), 3);
        assert_eq!(
            custom.fields()[1].nested.as_deref(),
            Some(&Representation::Ref)
        );
        assert!(matches!(
            custom.fields()[2].nested.as_deref(),
            Some(Representation::Custom(_))
        ));
    }

    #[test_case("(uuid,display" ; "missing close")]
    #[test_case("uuid,names:(name" ; "nested missing close")]
    #[test_case("()" ; "empty list")]
    #[test_case(":ref" ; "missing name")]
    fn test_parse_custom_malformed(spec: &str) {
        assert!(CustomRepresentation::parse(spec).is_err());
    }

    #[test]
    fn test_project_nested_arrays() {
        let custom = CustomRepresentation::parse("uuid,setMembers:(uuid)").unwrap();
        let full = json!({
            "uuid": "c1",
            "display": "Vitals",
            "setMembers": [
                {"uuid": "m1", "display": "Pulse"},
                {"uuid": "m2", "display": "Weight"}
            ]
        });
        let projected = custom.project(full.as_object().unwrap()).unwrap();
        assert_eq!(
            Value::Object(projected),
            json!({"uuid": "c1", "setMembers": [{"uuid": "m1"}, {"uuid": "m2"}]})
        );
    }

    #[test]
    fn test_project_skips_missing_fields() {
        let custom = CustomRepresentation::parse("uuid,nonexistent").unwrap();
        let full = json!({"uuid": "c1", "display": "x"});
        let projected = custom.project(full.as_object().unwrap()).unwrap();
        assert_eq!(projected.len(), 1);
    }

    #[test]
    fn test_project_nested_ref_keeps_reference_fields() {
        let custom = CustomRepresentation::parse("uuid,conceptClass:ref,setMembers:ref").unwrap();
        let full = json!({
            "uuid": "c1",
            "conceptClass": {"uuid": "k1", "display": "Test", "name": "Test", "links": []},
            "setMembers": [
                {"uuid": "m1", "display": "Pulse", "datatype": "Numeric", "retired": false, "links": []}
            ]
        });
        let projected = custom.project(full.as_object().unwrap()).unwrap();
        assert_eq!(
            Value::Object(projected),
            json!({
                "uuid": "c1",
                "conceptClass": {"uuid": "k1", "display": "Test", "links": []},
                "setMembers": [{"uuid": "m1", "display": "Pulse", "links": []}]
            })
        );
    }

    #[test]
    fn test_project_nested_named_is_unsupported() {
        let custom = CustomRepresentation::parse("uuid,setMembers:nosuchrep").unwrap();
        let full = json!({"uuid": "c1", "setMembers": [{"uuid": "m1"}]});
        let err = custom.project(full.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, RestError::UnsupportedOperation(_)));

        // rejected even when the field is absent
        let custom = CustomRepresentation::parse("uuid,names:(name,locale:fancy)").unwrap();
        assert!(custom.project(full.as_object().unwrap()).is_err());
    }

    #[test]
    fn test_display_round_trips_token() {
        let rep = Representation::parse(Some("custom:(uuid)")).unwrap();
        assert_eq!(rep.to_string(), "custom:(uuid)");
    }
}
