//! Search handler registry
//!
//! Handlers are indexed by `(resource, id)` and, per resource, by every
//! parameter they declare. A request resolves to a handler either by explicit
//! id or by the set of non-reserved parameter names it carries.

use super::handler::{SearchHandler, SearchHandlerKey};
use crate::core::request::RequestParameters;
use crate::domain::{PlatformVersion, RestError, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

/// Read-only index of search handlers
#[derive(Default)]
pub struct SearchHandlerRegistry {
    by_id: BTreeMap<SearchHandlerKey, Arc<dyn SearchHandler>>,
    by_parameter: HashMap<(String, String), BTreeSet<SearchHandlerKey>>,
}

impl SearchHandlerRegistry {
    /// Builds the registry, keeping handlers supported on `platform_version`
    ///
    /// # Errors
    ///
    /// Returns [`RestError::ConfigurationConflict`] if two supported handlers
    /// share a resource and an id.
    pub fn build(
        handlers: Vec<Arc<dyn SearchHandler>>,
        platform_version: &PlatformVersion,
    ) -> Result<Self> {
        let mut registry = Self::default();
        let mut skipped = 0usize;
        for handler in handlers {
            let config = handler.config();
            if !platform_version.supports_any(&config.supported_platform_versions) {
                tracing::debug!(
                    handler = %config.key(),
                    platform_version = %platform_version,
                    "Skipping search handler not supported on this platform version"
                );
                skipped += 1;
                continue;
            }
            registry.register(handler)?;
        }

        crate::log_registry_built!("search handler", registry.by_id.len(), skipped);
        Ok(registry)
    }

    /// Adds one handler to both indexes
    ///
    /// # Errors
    ///
    /// Returns [`RestError::ConfigurationConflict`] if a handler with the same
    /// resource and id is already registered.
    pub fn register(&mut self, handler: Arc<dyn SearchHandler>) -> Result<()> {
        let config = handler.config();
        let key = config.key();
        if let Some(existing) = self.by_id.get(&key) {
            return Err(RestError::ConfigurationConflict(format!(
                "Two search handlers ({} and {}) for the same resource ({}) must not have the \
                 same id ({})",
                existing.name(),
                handler.name(),
                key.supported_resource,
                key.id,
            )));
        }

        for parameter in config.parameters() {
            self.by_parameter
                .entry((key.supported_resource.clone(), parameter.to_string()))
                .or_default()
                .insert(key.clone());
        }
        self.by_id.insert(key, handler);
        Ok(())
    }

    /// Resolves the handler serving a request on `resource`
    ///
    /// Returns `Ok(None)` when the request carries no discriminating
    /// parameter, names a parameter no handler of the resource declares, or
    /// lacks the required parameters of every candidate.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::UnsupportedOperation`] for an unknown explicit
    /// search id or when several handlers match.
    pub fn get_search_handler(
        &self,
        resource: &str,
        parameters: &RequestParameters,
        reserved: &BTreeSet<String>,
    ) -> Result<Option<Arc<dyn SearchHandler>>> {
        if let Some(id) = parameters.search_id() {
            return self
                .by_id
                .get(&SearchHandlerKey::new(resource, id))
                .map(|handler| Some(Arc::clone(handler)))
                .ok_or_else(|| {
                    RestError::UnsupportedOperation(format!(
                        "Search with id '{id}' for '{resource}' resource is not recognized"
                    ))
                });
        }

        let discriminating = parameters.discriminating(reserved);
        if discriminating.is_empty() {
            return Ok(None);
        }

        let mut candidates: Option<BTreeSet<SearchHandlerKey>> = None;
        for parameter in &discriminating {
            let Some(keys) = self
                .by_parameter
                .get(&(resource.to_string(), parameter.to_string()))
            else {
                tracing::debug!(
                    resource,
                    parameter,
                    "No search handler declares this parameter"
                );
                return Ok(None);
            };
            candidates = Some(match candidates {
                None => keys.clone(),
                Some(current) => current.intersection(keys).cloned().collect(),
            });
        }

        let matches: Vec<&Arc<dyn SearchHandler>> = candidates
            .unwrap_or_default()
            .iter()
            .filter_map(|key| self.by_id.get(key))
            .filter(|handler| {
                handler
                    .config()
                    .required_parameters
                    .iter()
                    .all(|required| discriminating.contains(required.as_str()))
            })
            .collect();

        match matches.as_slice() {
            [] => {
                tracing::debug!(resource, "No search handler matches the request parameters");
                Ok(None)
            }
            [handler] => {
                tracing::debug!(handler = %handler.config().key(), "Search handler resolved");
                Ok(Some(Arc::clone(handler)))
            }
            several => {
                let ids: Vec<String> = several
                    .iter()
                    .map(|handler| format!("s={}", handler.config().id))
                    .collect();
                Err(RestError::UnsupportedOperation(format!(
                    "The search is ambiguous. Please specify {}",
                    ids.join(" or ")
                )))
            }
        }
    }

    /// Handler registered under `(resource, id)`
    pub fn get(&self, resource: &str, id: &str) -> Option<Arc<dyn SearchHandler>> {
        self.by_id
            .get(&SearchHandlerKey::new(resource, id))
            .map(Arc::clone)
    }

    /// All handlers, ordered by resource then id
    pub fn handlers(&self) -> impl Iterator<Item = &Arc<dyn SearchHandler>> {
        self.by_id.values()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl std::fmt::Debug for SearchHandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchHandlerRegistry")
            .field("handlers", &self.by_id.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::DataStore;
    use crate::core::constants::SPECIAL_REQUEST_PARAMETERS;
    use crate::core::search::SearchConfig;
    use crate::domain::DomainObject;

    struct StubHandler(SearchConfig);

    impl SearchHandler for StubHandler {
        fn config(&self) -> &SearchConfig {
            &self.0
        }

        fn name(&self) -> &'static str {
            "StubHandler"
        }

        fn search(
            &self,
            _parameters: &RequestParameters,
            _store: &dyn DataStore,
        ) -> Result<Vec<DomainObject>> {
            Ok(Vec::new())
        }
    }

    fn handler(config: SearchConfig) -> Arc<dyn SearchHandler> {
        Arc::new(StubHandler(config))
    }

    fn reserved() -> BTreeSet<String> {
        SPECIAL_REQUEST_PARAMETERS.iter().map(|s| s.to_string()).collect()
    }

    fn version() -> PlatformVersion {
        "1.9.4".parse().unwrap()
    }

    fn registry() -> SearchHandlerRegistry {
        SearchHandlerRegistry::build(
            vec![
                handler(SearchConfig::new("byName", "concept").with_required(["q"])),
                handler(
                    SearchConfig::new("byClass", "concept")
                        .with_required(["class"])
                        .with_optional(["q"]),
                ),
                handler(SearchConfig::new("default", "personattributetype").with_required(["q"])),
            ],
            &version(),
        )
        .unwrap()
    }

    fn resolve(resource: &str, query: &str) -> Result<Option<String>> {
        let params: RequestParameters = query.parse().unwrap();
        Ok(registry()
            .get_search_handler(resource, &params, &reserved())?
            .map(|h| h.config().id.clone()))
    }

    #[test]
    fn test_duplicate_id_fails() {
        let result = SearchHandlerRegistry::build(
            vec![
                handler(SearchConfig::new("byName", "concept").with_description("first")),
                handler(SearchConfig::new("byName", "concept").with_description("second")),
            ],
            &version(),
        );
        let err = result.unwrap_err();
        assert!(matches!(err, RestError::ConfigurationConflict(_)));
        assert_eq!(
            err.to_string(),
            "Two search handlers (StubHandler and StubHandler) for the same resource (concept) \
             must not have the same id (byName)"
        );
    }

    #[test]
    fn test_same_id_on_different_resources_is_allowed() {
        let registry = SearchHandlerRegistry::build(
            vec![
                handler(SearchConfig::new("default", "concept")),
                handler(SearchConfig::new("default", "conceptclass")),
            ],
            &version(),
        )
        .unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_unknown_explicit_id_is_an_error() {
        let err = resolve("concept", "s=byMagic").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Search with id 'byMagic' for 'concept' resource is not recognized"
        );
    }

    #[test]
    fn test_explicit_id_wins_over_parameters() {
        assert_eq!(
            resolve("concept", "s=byName&class=Test").unwrap().as_deref(),
            Some("byName")
        );
    }

    #[test]
    fn test_exact_match_resolves() {
        assert_eq!(resolve("concept", "class=Test").unwrap().as_deref(), Some("byClass"));
        assert_eq!(
            resolve("concept", "class=Test&q=pulse&v=full").unwrap().as_deref(),
            Some("byClass")
        );
    }

    #[test]
    fn test_undeclared_parameter_returns_none() {
        assert_eq!(resolve("concept", "q=pulse&color=red").unwrap(), None);
    }

    #[test]
    fn test_missing_required_parameter_returns_none() {
        let registry = SearchHandlerRegistry::build(
            vec![handler(
                SearchConfig::new("byCode", "concept")
                    .with_required(["code"])
                    .with_optional(["source"]),
            )],
            &version(),
        )
        .unwrap();
        let params: RequestParameters = "source=CIEL".parse().unwrap();
        assert!(registry
            .get_search_handler("concept", &params, &reserved())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_ambiguous_search_lists_both_ids() {
        let registry = SearchHandlerRegistry::build(
            vec![
                handler(SearchConfig::new("b", "concept").with_required(["q"])),
                handler(SearchConfig::new("a", "concept").with_required(["q"])),
            ],
            &version(),
        )
        .unwrap();
        let params: RequestParameters = "q=pulse".parse().unwrap();
        let err = registry
            .get_search_handler("concept", &params, &reserved())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "The search is ambiguous. Please specify s=a or s=b"
        );
    }

    #[test]
    fn test_reserved_required_parameter_never_satisfied() {
        let registry = SearchHandlerRegistry::build(
            vec![handler(
                SearchConfig::new("paged", "concept").with_required(["q", "limit"]),
            )],
            &version(),
        )
        .unwrap();
        let params: RequestParameters = "q=pulse&limit=5".parse().unwrap();
        assert!(registry
            .get_search_handler("concept", &params, &reserved())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_only_reserved_parameters_returns_none() {
        assert_eq!(resolve("concept", "v=full&limit=5").unwrap(), None);
    }

    #[test]
    fn test_parameter_index_is_scoped_per_resource() {
        assert_eq!(resolve("conceptclass", "q=pulse").unwrap(), None);
        assert_eq!(
            resolve("personattributetype", "q=race").unwrap().as_deref(),
            Some("default")
        );
    }

    #[test]
    fn test_version_gating() {
        let registry = SearchHandlerRegistry::build(
            vec![
                handler(SearchConfig::new("old", "concept").with_platform_versions(["1.8.*"])),
                handler(SearchConfig::new("any", "concept")),
                handler(
                    SearchConfig::new("new", "concept")
                        .with_platform_versions(["1.8.*", "1.9.*"]),
                ),
            ],
            &version(),
        )
        .unwrap();
        let ids: Vec<_> = registry.handlers().map(|h| h.config().id.clone()).collect();
        assert_eq!(ids, vec!["any", "new"]);
    }
}
