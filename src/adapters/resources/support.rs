//! Helpers shared by the built-in resources

use crate::core::constants::URI_PREFIX;
use crate::domain::{Representation, RestError, Result, SimpleObject};
use serde_json::{json, Value};

/// Amount of detail a built-in resource renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Detail {
    Ref,
    Default,
    Full,
}

/// Renders `representation` with a resource's detail builder
///
/// Custom representations are projected from the full representation. Named
/// representations are not supported by the built-in resources.
pub fn render(
    resource: &str,
    representation: &Representation,
    build: impl FnOnce(Detail) -> Result<SimpleObject>,
) -> Result<SimpleObject> {
    match representation {
        Representation::Ref => build(Detail::Ref),
        Representation::Default => build(Detail::Default),
        Representation::Full => build(Detail::Full),
        Representation::Custom(custom) => custom.project(&build(Detail::Full)?),
        Representation::Named(name) => Err(RestError::UnsupportedOperation(format!(
            "Representation '{name}' is not supported by the '{resource}' resource"
        ))),
    }
}

/// Resource URI of an object, e.g. `/ws/rest/v1/concept/<uuid>`
pub fn uri(path: &str, uuid: &str) -> String {
    format!("{URI_PREFIX}/{path}/{uuid}")
}

/// `uuid`, `display` and a `self` link, the fields of every representation
pub fn base_object(path: &str, uuid: &str, display: &str) -> SimpleObject {
    let mut object = SimpleObject::new();
    object.insert("uuid".to_string(), Value::from(uuid));
    object.insert("display".to_string(), Value::from(display));
    object.insert(
        "links".to_string(),
        json!([{ "rel": "self", "uri": uri(path, uuid) }]),
    );
    object
}

/// Reference representation as a JSON value
pub fn reference(path: &str, uuid: &str, display: &str) -> Value {
    Value::Object(base_object(path, uuid, display))
}

/// Moves `links` to the end of a built object, where clients expect it
pub fn links_last(object: SimpleObject) -> SimpleObject {
    let (links, fields): (Vec<_>, Vec<_>) =
        object.into_iter().partition(|(key, _)| key == "links");
    fields.into_iter().chain(links).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_object() {
        let object = base_object("conceptclass", "abc", "Test");
        assert_eq!(object["uuid"], "abc");
        assert_eq!(object["display"], "Test");
        assert_eq!(object["links"][0]["uri"], "/ws/rest/v1/conceptclass/abc");
    }

    #[test]
    fn test_render_named_is_unsupported() {
        let result = render("concept", &Representation::Named("xyz".into()), |_| {
            Ok(SimpleObject::new())
        });
        assert!(matches!(result, Err(RestError::UnsupportedOperation(_))));
    }

    #[test]
    fn test_render_custom_projects_full() {
        let representation = Representation::parse(Some("custom:(uuid,name)")).unwrap();
        let object = render("concept", &representation, |detail| {
            assert_eq!(detail, Detail::Full);
            let mut object = base_object("concept", "c1", "Pulse");
            object.insert("name".to_string(), Value::from("Pulse"));
            Ok(object)
        })
        .unwrap();
        assert_eq!(object.keys().collect::<Vec<_>>(), vec!["uuid", "name"]);
    }

    #[test]
    fn test_links_last() {
        let mut object = base_object("concept", "c1", "Pulse");
        object.insert("name".to_string(), Value::from("Pulse"));
        let object = links_last(object);
        assert_eq!(object.keys().last().map(String::as_str), Some("links"));
    }
}
