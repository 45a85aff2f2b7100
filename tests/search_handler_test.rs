//! Integration tests for search handler registration and resolution

use restws::adapters::resources::default_catalog;
use restws::adapters::store::DataStore;
use restws::core::provider::Catalog;
use restws::core::request::RequestParameters;
use restws::core::search::{SearchConfig, SearchHandler};
use restws::core::service::RestService;
use restws::domain::{DomainObject, PlatformVersion, RestError, Result};
use std::sync::Arc;
use test_case::test_case;

/// Handler that returns nothing and is identified by its config
struct Fixed {
    name: &'static str,
    config: SearchConfig,
}

impl Fixed {
    fn new(name: &'static str, config: SearchConfig) -> Arc<dyn SearchHandler> {
        Arc::new(Self { name, config })
    }
}

impl SearchHandler for Fixed {
    fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn search(&self, _: &RequestParameters, _: &dyn DataStore) -> Result<Vec<DomainObject>> {
        Ok(Vec::new())
    }
}

fn service(catalog: Catalog, version: &str) -> RestService {
    RestService::new(Arc::new(catalog), PlatformVersion::new(version).unwrap())
}

fn params(query: &str) -> RequestParameters {
    query.parse().unwrap()
}

fn resolved_id(service: &RestService, resource: &str, query: &str) -> Option<String> {
    service
        .get_search_handler(resource, &params(query))
        .unwrap()
        .map(|handler| handler.config().id.clone())
}

#[test_case("q=pulse", Some("byName") ; "name query")]
#[test_case("class=Test", Some("byClass") ; "class only")]
#[test_case("class=Test&q=pul", Some("byClass") ; "class and optional query")]
#[test_case("code=5089&source=CIEL", Some("byCode") ; "code and source")]
#[test_case("source=CIEL", None ; "optional parameter only")]
#[test_case("q=pulse&unknown=1", None ; "undeclared parameter")]
#[test_case("v=full&limit=5", None ; "reserved parameters only")]
#[test_case("", None ; "no parameters")]
fn test_concept_search_resolution(query: &str, expected: Option<&str>) {
    let service = service(default_catalog(), "1.9.0");
    assert_eq!(resolved_id(&service, "concept", query).as_deref(), expected);
}

#[test]
fn test_reserved_parameters_do_not_discriminate() {
    let service = service(default_catalog(), "1.9.0");
    assert_eq!(
        resolved_id(&service, "concept", "q=pulse&v=full&startIndex=2&includeAll=true").as_deref(),
        Some("byName")
    );
}

#[test]
fn test_handlers_are_scoped_per_resource() {
    let service = service(default_catalog(), "1.9.0");
    let handler = service
        .get_search_handler("conceptclass", &params("q=test"))
        .unwrap()
        .unwrap();
    assert_eq!(handler.config().supported_resource, "conceptclass");
    assert_eq!(handler.config().id, "default");

    // byClass declares `class` only on concept
    assert_eq!(resolved_id(&service, "personattributetype", "class=x"), None);
}

#[test]
fn test_version_filtering_removes_handlers() {
    let service = service(default_catalog(), "1.8.2");
    assert_eq!(resolved_id(&service, "concept", "code=5089"), None);
    assert!(service.search_handler_registry().unwrap().get("concept", "byCode").is_none());
    assert!(service.search_handler_registry().unwrap().get("concept", "byName").is_some());
}

#[test]
fn test_explicit_search_id() {
    let service = service(default_catalog(), "1.9.0");
    assert_eq!(
        resolved_id(&service, "concept", "s=byCode&code=5089").as_deref(),
        Some("byCode")
    );

    let err = service
        .get_search_handler("concept", &params("s=byColor&q=x"))
        .unwrap_err();
    assert!(matches!(err, RestError::UnsupportedOperation(_)));
    assert_eq!(
        err.to_string(),
        "Search with id 'byColor' for 'concept' resource is not recognized"
    );
}

#[test]
fn test_ambiguous_search_lists_ids() {
    let catalog = Catalog::new()
        .with_search_handler(Fixed::new(
            "ByZip",
            SearchConfig::new("zip", "location").with_required(["q"]),
        ))
        .with_search_handler(Fixed::new(
            "ByCity",
            SearchConfig::new("city", "location").with_required(["q"]),
        ));
    let service = service(catalog, "1.9.0");

    let err = service
        .get_search_handler("location", &params("q=springfield"))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "The search is ambiguous. Please specify s=city or s=zip"
    );

    assert_eq!(
        resolved_id(&service, "location", "s=zip&q=springfield").as_deref(),
        Some("zip")
    );
}

#[test]
fn test_required_parameters_disambiguate() {
    let catalog = Catalog::new()
        .with_search_handler(Fixed::new(
            "ByName",
            SearchConfig::new("byName", "location").with_required(["q"]),
        ))
        .with_search_handler(Fixed::new(
            "ByTag",
            SearchConfig::new("byTag", "location")
                .with_required(["tag"])
                .with_optional(["q"]),
        ));
    let service = service(catalog, "1.9.0");

    assert_eq!(
        resolved_id(&service, "location", "q=x").as_deref(),
        Some("byName")
    );
    assert_eq!(
        resolved_id(&service, "location", "q=x&tag=y").as_deref(),
        Some("byTag")
    );
}

#[test]
fn test_duplicate_id_is_conflict() {
    let catalog = Catalog::new()
        .with_search_handler(Fixed::new("First", SearchConfig::new("default", "location")))
        .with_search_handler(Fixed::new("Second", SearchConfig::new("default", "location")));
    let service = service(catalog, "1.9.0");

    let err = service
        .get_search_handler("location", &params("q=x"))
        .unwrap_err();
    assert!(matches!(err, RestError::ConfigurationConflict(_)));
    assert!(err.to_string().contains(
        "Two search handlers (First and Second) for the same resource (location) must not have \
         the same id (default)"
    ));
}

#[test]
fn test_duplicate_id_on_unsupported_version_is_ignored() {
    let catalog = Catalog::new()
        .with_search_handler(Fixed::new(
            "Old",
            SearchConfig::new("default", "location")
                .with_platform_versions(["1.8.*"])
                .with_required(["q"]),
        ))
        .with_search_handler(Fixed::new(
            "New",
            SearchConfig::new("default", "location")
                .with_platform_versions(["1.9.*"])
                .with_required(["q"]),
        ));
    let service = service(catalog, "1.9.1");

    let handler = service
        .get_search_handler("location", &params("q=x"))
        .unwrap()
        .unwrap();
    assert_eq!(handler.name(), "New");
}
