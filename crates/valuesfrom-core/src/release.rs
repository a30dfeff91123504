//! HelmRelease manifest types
//!
//! Only the parts of a Flux `HelmRelease` that drive `valuesFrom` resolution
//! are modelled here. Every other field is ignored so newer manifests keep
//! parsing.

use serde::{Deserialize, Deserializer};
use std::path::Path;

use crate::error::{CoreError, Result};

/// A Flux HelmRelease, reduced to `metadata` and `spec.valuesFrom`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HelmRelease {
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ReleaseMetadata,

    #[serde(default, deserialize_with = "null_as_default")]
    pub spec: HelmReleaseSpec,
}

/// Release metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReleaseMetadata {
    #[serde(default, deserialize_with = "optional_scalar")]
    pub name: Option<String>,

    /// Namespace inherited by selectors that do not set their own
    #[serde(default, deserialize_with = "optional_scalar")]
    pub namespace: Option<String>,
}

/// `spec` section of a HelmRelease
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmReleaseSpec {
    #[serde(default, deserialize_with = "null_as_default")]
    pub values_from: Vec<ValuesFromSource>,
}

/// One entry of `spec.valuesFrom`
///
/// Exactly one arm is expected to be set. Entries with neither arm are
/// skipped during extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuesFromSource {
    #[serde(default)]
    pub config_map_key_ref: Option<ResourceKeySelector>,

    #[serde(default)]
    pub secret_key_ref: Option<ResourceKeySelector>,
}

/// `configMapKeyRef` / `secretKeyRef` payload
///
/// `name` must be present and non-empty. The other fields treat an explicit
/// `null` like an absent field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResourceKeySelector {
    #[serde(deserialize_with = "required_name")]
    pub name: String,

    #[serde(default, deserialize_with = "scalar_or_empty")]
    pub key: String,

    #[serde(default, deserialize_with = "scalar_or_empty")]
    pub namespace: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub optional: bool,
}

impl HelmRelease {
    /// Parse a HelmRelease from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse a HelmRelease from raw bytes
    pub fn from_slice(content: &[u8]) -> Result<Self> {
        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_slice(content)?)
    }

    /// Load a HelmRelease from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read(path).map_err(|source| CoreError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_slice(&content)
    }

    /// Metadata namespace rendered as text, empty when absent
    pub fn namespace(&self) -> &str {
        self.metadata.namespace.as_deref().unwrap_or_default()
    }
}

/// Render a YAML scalar as text. Mappings, sequences and null yield `None`.
pub(crate) fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        _ => None,
    }
}

pub(crate) fn optional_scalar<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_to_string))
}

fn scalar_or_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_scalar(deserializer)?.unwrap_or_default())
}

fn required_name<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match optional_scalar(deserializer)? {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(serde::de::Error::custom("selector name must be a non-empty string")),
    }
}

/// Treat an explicit `null` the same as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
