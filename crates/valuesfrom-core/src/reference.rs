//! Canonical valuesFrom references
//!
//! [`extract_references`] turns the raw `spec.valuesFrom` entries of a
//! [`HelmRelease`] into [`CanonicalReference`]s with the default key and the
//! release namespace applied.

use std::fmt;

use crate::release::{HelmRelease, ResourceKeySelector, ValuesFromSource};

/// Key read from the referenced resource when the selector does not name one
pub const DEFAULT_VALUES_KEY: &str = "values.yaml";

/// Kind of resource a valuesFrom entry points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValuesFromKind {
    ConfigMap,
    Secret,
}

impl ValuesFromKind {
    /// Kubernetes `kind` string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigMap => "ConfigMap",
            Self::Secret => "Secret",
        }
    }
}

impl fmt::Display for ValuesFromKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ValuesFromSource {
    /// The populated arm of this entry, if any
    ///
    /// `configMapKeyRef` takes precedence when both arms are set.
    pub fn kind_and_selector(&self) -> Option<(ValuesFromKind, &ResourceKeySelector)> {
        match (&self.config_map_key_ref, &self.secret_key_ref) {
            (Some(selector), _) => Some((ValuesFromKind::ConfigMap, selector)),
            (None, Some(selector)) => Some((ValuesFromKind::Secret, selector)),
            (None, None) => None,
        }
    }
}

/// A valuesFrom entry with defaults applied, ready for lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalReference {
    pub kind: ValuesFromKind,
    pub name: String,
    /// Carried for diagnostics; lookups match on kind and name only
    pub namespace: String,
    pub key: String,
    pub optional: bool,
}

impl CanonicalReference {
    fn from_selector(kind: ValuesFromKind, selector: &ResourceKeySelector, release_namespace: &str) -> Self {
        let key = if selector.key.is_empty() {
            DEFAULT_VALUES_KEY
        } else {
            selector.key.as_str()
        };
        let namespace = if selector.namespace.is_empty() {
            release_namespace
        } else {
            selector.namespace.as_str()
        };

        Self {
            kind,
            name: selector.name.clone(),
            namespace: namespace.to_string(),
            key: key.to_string(),
            optional: selector.optional,
        }
    }
}

impl fmt::Display for CanonicalReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{} key '{}'", self.kind, self.namespace, self.name, self.key)?;
        if self.optional {
            write!(f, " (optional)")?;
        }
        Ok(())
    }
}

/// Normalize every populated `spec.valuesFrom` entry, preserving order
pub fn extract_references(release: &HelmRelease) -> Vec<CanonicalReference> {
    let release_namespace = release.namespace();

    release
        .spec
        .values_from
        .iter()
        .filter_map(ValuesFromSource::kind_and_selector)
        .map(|(kind, selector)| CanonicalReference::from_selector(kind, selector, release_namespace))
        .collect()
}
