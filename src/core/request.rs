//! Request parameters

use super::constants::{
    REQUEST_PROPERTY_FOR_LIMIT, REQUEST_PROPERTY_FOR_REPRESENTATION,
    REQUEST_PROPERTY_FOR_SEARCH_ID, REQUEST_PROPERTY_FOR_START_INDEX,
};
use crate::domain::{RestError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

/// Query parameters of a request, keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParameters(BTreeMap<String, String>);

impl RequestParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Explicitly requested search handler id (`s`)
    pub fn search_id(&self) -> Option<&str> {
        self.get(REQUEST_PROPERTY_FOR_SEARCH_ID)
    }

    /// Requested representation token (`v`)
    pub fn representation(&self) -> Option<&str> {
        self.get(REQUEST_PROPERTY_FOR_REPRESENTATION)
    }

    /// Requested page size (`limit`)
    pub fn limit(&self) -> Result<Option<usize>> {
        self.parse_usize(REQUEST_PROPERTY_FOR_LIMIT)
    }

    /// Requested index of the first result (`startIndex`)
    pub fn start_index(&self) -> Result<Option<usize>> {
        self.parse_usize(REQUEST_PROPERTY_FOR_START_INDEX)
    }

    /// Parameter names that can select a search handler
    pub fn discriminating<'a>(&'a self, reserved: &BTreeSet<String>) -> BTreeSet<&'a str> {
        self.names().filter(|name| !reserved.contains(*name)).collect()
    }

    fn parse_usize(&self, name: &str) -> Result<Option<usize>> {
        self.get(name)
            .map(|value| {
                value.trim().parse().map_err(|_| {
                    RestError::Validation(format!(
                        "Parameter '{name}' must be a non-negative integer, got '{value}'"
                    ))
                })
            })
            .transpose()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl FromStr for RequestParameters {
    type Err = RestError;

    /// Parses `name=value&name=value`; a bare name has an empty value
    fn from_str(query: &str) -> Result<Self> {
        let query = query.trim_start_matches('?');
        let mut parameters = Self::new();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            if name.is_empty() {
                return Err(RestError::Validation(format!(
                    "Parameter without a name in '{pair}'"
                )));
            }
            parameters.insert(name, value);
        }
        Ok(parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::SPECIAL_REQUEST_PARAMETERS;

    fn reserved() -> BTreeSet<String> {
        SPECIAL_REQUEST_PARAMETERS.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_discriminating_excludes_reserved() {
        let params: RequestParameters = "q=pulse&v=full&limit=5&class=Test".parse().unwrap();
        let names: Vec<_> = params.discriminating(&reserved()).into_iter().collect();
        assert_eq!(names, vec!["class", "q"]);
    }

    #[test]
    fn test_paging_parameters() {
        let params = RequestParameters::new()
            .with("limit", "10")
            .with("startIndex", "20");
        assert_eq!(params.limit().unwrap(), Some(10));
        assert_eq!(params.start_index().unwrap(), Some(20));

        let bad = RequestParameters::new().with("limit", "ten");
        assert!(matches!(bad.limit(), Err(RestError::Validation(_))));
        assert_eq!(RequestParameters::new().limit().unwrap(), None);
    }

    #[test]
    fn test_parse_query_string() {
        let params: RequestParameters = "?s=byName&q=&purge".parse().unwrap();
        assert_eq!(params.search_id(), Some("byName"));
        assert_eq!(params.get("q"), Some(""));
        assert!(params.contains("purge"));
        assert!("=x".parse::<RequestParameters>().is_err());
    }
}
