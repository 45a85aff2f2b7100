//! Resource registry
//!
//! Built once from the registration table:
//!
//! 1. entries without a usable declaration are skipped
//! 2. entries whose platform version constraints exclude the current version are skipped
//! 3. entries sharing a name compete by order: the lowest order wins and two
//!    entries with the same name and order are a fatal conflict
//! 4. winners are instantiated; a failing constructor is a fatal conflict
//! 5. winners are indexed by name and by supported domain type

use super::declaration::{Declaration, ResourceDeclaration, ResourceRegistration};
use super::Resource;
use crate::domain::{DomainType, PlatformVersion, RestError, Result};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// A registered resource instance and the metadata it won with
#[derive(Clone)]
pub struct ResourceDefinition {
    pub name: String,
    pub implementation: String,
    pub order: i32,
    pub supported_type: &'static DomainType,
    pub resource: Arc<dyn Resource>,
}

impl fmt::Debug for ResourceDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceDefinition")
            .field("name", &self.name)
            .field("implementation", &self.implementation)
            .field("order", &self.order)
            .field("supported_type", &self.supported_type.name())
            .finish_non_exhaustive()
    }
}

/// A registration whose declaration resolved to a full path name
struct Candidate<'a> {
    name: String,
    order: i32,
    supported_type: &'static DomainType,
    versions: &'a [String],
    registration: &'a ResourceRegistration,
}

/// Read-only index of resources by path name and by domain type
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    by_name: HashMap<String, ResourceDefinition>,
    by_type: HashMap<&'static DomainType, String>,
}

impl ResourceRegistry {
    /// Builds the registry for the given platform version
    ///
    /// # Errors
    ///
    /// Returns [`RestError::ConfigurationConflict`] if two supported
    /// registrations share a name and an order, or if a winner cannot be
    /// instantiated.
    pub fn build(
        registrations: &[ResourceRegistration],
        platform_version: &PlatformVersion,
    ) -> Result<Self> {
        let parents: HashMap<&str, &ResourceDeclaration> = registrations
            .iter()
            .filter_map(|r| match r.declaration() {
                Some(Declaration::Resource(d)) => Some((r.implementation(), d)),
                _ => None,
            })
            .collect();

        let mut by_candidate_name: BTreeMap<String, Vec<Candidate<'_>>> = BTreeMap::new();
        let mut skipped = 0usize;
        for registration in registrations {
            let Some(candidate) = resolve(registration, &parents) else {
                skipped += 1;
                continue;
            };
            if !platform_version.supports_any(candidate.versions) {
                tracing::debug!(
                    implementation = registration.implementation(),
                    name = %candidate.name,
                    platform_version = %platform_version,
                    "Skipping resource not supported on this platform version"
                );
                skipped += 1;
                continue;
            }
            by_candidate_name
                .entry(candidate.name.clone())
                .or_default()
                .push(candidate);
        }

        let mut registry = Self::default();
        for (name, mut candidates) in by_candidate_name {
            candidates.sort_by_key(|c| c.order);
            if let [first, second, ..] = candidates.as_slice() {
                if let Some(pair) = candidates.windows(2).find(|w| w[0].order == w[1].order) {
                    return Err(RestError::ConfigurationConflict(format!(
                        "Two resources with the same name ({name}) must not have the same order \
                         ({order}): {} and {}",
                        pair[0].registration.implementation(),
                        pair[1].registration.implementation(),
                        order = pair[0].order,
                    )));
                }
                tracing::debug!(
                    name = %name,
                    winner = first.registration.implementation(),
                    discarded = second.registration.implementation(),
                    "Resource replaced by lower order implementation"
                );
            }

            let winner = &candidates[0];
            let resource = winner.registration.instantiate().map_err(|e| {
                RestError::ConfigurationConflict(format!(
                    "Failed to instantiate {}: {e}",
                    winner.registration.implementation()
                ))
            })?;
            registry.insert(ResourceDefinition {
                name,
                implementation: winner.registration.implementation().to_string(),
                order: winner.order,
                supported_type: winner.supported_type,
                resource,
            });
        }

        crate::log_registry_built!("resource", registry.by_name.len(), skipped);
        Ok(registry)
    }

    fn insert(&mut self, definition: ResourceDefinition) {
        if let Some(existing) = self.by_type.get(definition.supported_type) {
            if self.by_name[existing].order <= definition.order {
                tracing::warn!(
                    domain_type = %definition.supported_type,
                    kept = %existing,
                    ignored = %definition.name,
                    "Two resources support the same domain type"
                );
                self.by_name.insert(definition.name.clone(), definition);
                return;
            }
        }
        self.by_type
            .insert(definition.supported_type, definition.name.clone());
        self.by_name.insert(definition.name.clone(), definition);
    }

    /// Looks up a resource by its path name
    ///
    /// # Errors
    ///
    /// Returns [`RestError::ResourceNotFound`] if no resource has this name.
    pub fn get_by_name(&self, name: &str) -> Result<Arc<dyn Resource>> {
        self.definition(name)
            .map(|d| Arc::clone(&d.resource))
            .ok_or_else(|| RestError::ResourceNotFound(name.to_string()))
    }

    /// Looks up the resource for a domain type
    ///
    /// An exact registration wins; otherwise the resource registered for the
    /// nearest supertype is returned.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::ResourceNotFound`] if neither the type nor any of
    /// its supertypes is registered.
    pub fn get_by_supported_type(&self, domain_type: &DomainType) -> Result<Arc<dyn Resource>> {
        self.by_type
            .get(domain_type)
            .or_else(|| domain_type.ancestors().find_map(|t| self.by_type.get(t)))
            .and_then(|name| self.definition(name))
            .map(|d| Arc::clone(&d.resource))
            .ok_or_else(|| RestError::ResourceNotFound(domain_type.name().to_string()))
    }

    /// Definition registered under `name`
    pub fn definition(&self, name: &str) -> Option<&ResourceDefinition> {
        self.by_name.get(name)
    }

    /// All definitions, ordered by name
    pub fn definitions(&self) -> Vec<&ResourceDefinition> {
        let mut definitions: Vec<_> = self.by_name.values().collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Resolves a registration's declaration, or `None` if it must be skipped
fn resolve<'a>(
    registration: &'a ResourceRegistration,
    parents: &HashMap<&str, &'a ResourceDeclaration>,
) -> Option<Candidate<'a>> {
    match registration.declaration() {
        Some(Declaration::Resource(d)) => Some(Candidate {
            name: d.name.clone(),
            order: d.order,
            supported_type: d.supported_type,
            versions: &d.supported_platform_versions,
            registration,
        }),
        Some(Declaration::SubResource(d)) => {
            let Some(parent) = parents.get(d.parent.as_str()) else {
                tracing::warn!(
                    implementation = registration.implementation(),
                    parent = %d.parent,
                    "Skipping sub-resource whose parent is not a declared resource"
                );
                return None;
            };
            let versions = if d.supported_platform_versions.is_empty() {
                &parent.supported_platform_versions
            } else {
                &d.supported_platform_versions
            };
            Some(Candidate {
                name: format!("{}/{}", parent.name, d.path),
                order: d.order,
                supported_type: d.supported_type,
                versions,
                registration,
            })
        }
        None => {
            tracing::warn!(
                implementation = registration.implementation(),
                "Skipping resource without a declaration"
            );
            None
        }
    }
}
