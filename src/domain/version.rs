//! Platform version compatibility
//!
//! Components may restrict the platform versions they run on. Constraints use
//! the module-descriptor syntax of the host platform:
//!
//! - `1.9.0` is a minimum version
//! - `1.9.*` matches any version whose leading components match
//! - `1.8.* - 1.9.*` is an inclusive range; `*` reads as 0 in the lower bound
//!   and as unbounded in the upper bound
//!
//! Qualifiers such as `-SNAPSHOT` are ignored and missing components count as 0.

use super::errors::RestError;
use super::result::Result;
use semver::Version;
use std::fmt;
use std::str::FromStr;

/// Version of the running platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformVersion {
    raw: String,
    version: Version,
}

impl PlatformVersion {
    /// Parses a platform version such as `1.9.7` or `1.10.0-SNAPSHOT`
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let version = parse_bound(&raw, 0).map_err(|e| {
            RestError::Configuration(format!("Invalid platform version '{raw}': {e}"))
        })?;
        Ok(Self { raw, version })
    }

    /// Version string as configured
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns true if any of `constraints` is satisfied; an empty list allows every version
    pub fn supports_any<S: AsRef<str>>(&self, constraints: &[S]) -> bool {
        if constraints.is_empty() {
            return true;
        }
        constraints.iter().any(|constraint| {
            match check_required_version(self, constraint.as_ref()) {
                Ok(()) => true,
                Err(RestError::VersionMismatch(reason)) => {
                    tracing::trace!(%reason, "Version constraint not satisfied");
                    false
                }
                Err(e) => {
                    tracing::warn!(
                        constraint = constraint.as_ref(),
                        error = %e,
                        "Ignoring malformed version constraint"
                    );
                    false
                }
            }
        })
    }
}

impl FromStr for PlatformVersion {
    type Err = RestError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for PlatformVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Checks `current` against a single constraint
///
/// # Errors
///
/// Returns [`RestError::VersionMismatch`] when the constraint is not
/// satisfied and [`RestError::Validation`] when it cannot be parsed.
pub fn check_required_version(current: &PlatformVersion, constraint: &str) -> Result<()> {
    let constraint = constraint.trim();
    let (lower, upper) = match split_range(constraint) {
        Some((lo, hi)) => (parse_bound(lo, 0)?, Some(parse_bound(hi, u64::MAX)?)),
        None if constraint.contains('*') => (
            parse_bound(constraint, 0)?,
            Some(parse_bound(constraint, u64::MAX)?),
        ),
        None => (parse_bound(constraint, 0)?, None),
    };

    let version = &current.version;
    let within = *version >= lower && upper.as_ref().map_or(true, |upper| version <= upper);
    if within {
        Ok(())
    } else {
        Err(RestError::VersionMismatch(format!(
            "platform version {current} does not satisfy '{constraint}'"
        )))
    }
}

/// Splits `a - b` on a dash that is followed by a version component
///
/// Dashes followed by a letter start a qualifier (`1.9.0-SNAPSHOT`) and are
/// not range separators.
fn split_range(constraint: &str) -> Option<(&str, &str)> {
    constraint.char_indices().find_map(|(i, c)| {
        if c != '-' || i == 0 {
            return None;
        }
        let rest = &constraint[i + 1..];
        match rest.trim_start().chars().next() {
            Some(next) if next.is_ascii_digit() || next == '*' => {
                Some((constraint[..i].trim(), rest.trim()))
            }
            _ => None,
        }
    })
}

/// Parses up to three numeric components, substituting `fill` for `*`
/// wildcards and for components after a wildcard
fn parse_bound(raw: &str, fill: u64) -> Result<Version> {
    let core = raw
        .trim()
        .split(|c: char| c == '-' || c.is_whitespace())
        .next()
        .unwrap_or_default();
    if core.is_empty() {
        return Err(RestError::Validation(format!("empty version in '{raw}'")));
    }

    let mut parts = [0u64; 3];
    let mut wildcard = false;
    for (index, component) in core.split('.').enumerate() {
        if index >= parts.len() {
            break;
        }
        if wildcard || component == "*" {
            wildcard = true;
            parts[index] = fill;
            continue;
        }
        parts[index] = component.parse().map_err(|_| {
            RestError::Validation(format!("invalid version component '{component}' in '{raw}'"))
        })?;
    }
    if wildcard {
        // components not spelled out after a wildcard are wildcards too
        let spelled = core.split('.').count().min(parts.len());
        for part in parts.iter_mut().skip(spelled) {
            *part = fill;
        }
    }

    Ok(Version::new(parts[0], parts[1], parts[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn version(raw: &str) -> PlatformVersion {
        PlatformVersion::new(raw).unwrap()
    }

    #[test_case("1.9.7", "1.9.*", true ; "wildcard match")]
    #[test_case("1.10.0", "1.9.*", false ; "wildcard minor mismatch")]
    #[test_case("1.8.4", "1.8.*", true ; "legacy wildcard")]
    #[test_case("1.9.0", "1.8.0", true ; "minimum version satisfied")]
    #[test_case("1.7.5", "1.8.0", false ; "minimum version not satisfied")]
    #[test_case("1.9.3", "1.8.* - 1.9.*", true ; "range upper wildcard")]
    #[test_case("1.10.0", "1.8.* - 1.9.*", false ; "range exceeded")]
    #[test_case("2.0.0", "1.9.* - 9.*", true ; "open ended range")]
    #[test_case("1.9.0-SNAPSHOT", "1.9.*", true ; "qualifier ignored")]
    #[test_case("1.9", "1.9.0", true ; "missing patch is zero")]
    fn test_check_required_version(current: &str, constraint: &str, expected: bool) {
        let result = check_required_version(&version(current), constraint);
        assert_eq!(result.is_ok(), expected, "{current} vs {constraint}");
    }

    #[test]
    fn test_mismatch_is_version_mismatch_error() {
        let err = check_required_version(&version("1.7.0"), "1.9.*").unwrap_err();
        assert!(matches!(err, RestError::VersionMismatch(_)));
    }

    #[test]
    fn test_malformed_constraint_is_validation_error() {
        let err = check_required_version(&version("1.9.0"), "one.nine").unwrap_err();
        assert!(matches!(err, RestError::Validation(_)));
    }

    #[test]
    fn test_supports_any() {
        let current = version("1.9.2");
        assert!(current.supports_any::<&str>(&[]));
        assert!(current.supports_any(&["1.8.*", "1.9.*"]));
        assert!(!current.supports_any(&["1.8.*", "garbage"]));
    }

    #[test]
    fn test_invalid_platform_version() {
        assert!(PlatformVersion::new("").is_err());
        assert!(PlatformVersion::new("x.y").is_err());
        assert_eq!(version("1.9.7").as_str(), "1.9.7");
    }
}
