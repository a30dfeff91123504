//! Lookup of valuesFrom references in a directory of Kubernetes manifests
//!
//! Every regular file below the values directory is scanned as a stream of
//! YAML documents. The first ConfigMap or Secret whose kind and name match
//! the reference supplies the value. Namespaces are not compared.

use base64::Engine as _;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::error::{CoreError, Result};
use crate::reference::{CanonicalReference, ValuesFromKind};
use crate::release::{null_as_default, optional_scalar, scalar_to_string};

/// A ConfigMap or Secret document found in the values directory
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResourceDocument {
    #[serde(default, deserialize_with = "optional_scalar")]
    pub kind: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ResourceMetadata,

    /// Payloads by key; Secret payloads are base64 at rest
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResourceMetadata {
    #[serde(default, deserialize_with = "optional_scalar")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "optional_scalar")]
    pub namespace: Option<String>,
}

impl ResourceDocument {
    /// Whether this document is the resource the reference points at
    pub fn matches(&self, reference: &CanonicalReference) -> bool {
        self.kind.as_deref() == Some(reference.kind.as_str())
            && self.metadata.name.as_deref() == Some(reference.name.as_str())
    }

    /// Raw payload stored under `key`, empty when missing or not a scalar
    pub fn value_for(&self, key: &str) -> String {
        self.data
            .get(key)
            .and_then(scalar_to_string)
            .unwrap_or_default()
    }
}

/// Directory of candidate ConfigMap and Secret manifests
///
/// The file list is collected once when the directory is opened. File
/// contents are read again for every lookup.
#[derive(Debug, Clone)]
pub struct ValuesDirectory {
    root: PathBuf,
    files: Vec<PathBuf>,
}

impl ValuesDirectory {
    /// Open a values directory and list its regular files recursively
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(CoreError::ValuesDirNotFound {
                path: root.to_path_buf(),
            });
        }

        let files: Vec<PathBuf> = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .collect();

        debug!(
            root = %root.display(),
            count = files.len(),
            "Files for valuesFrom found"
        );

        Ok(Self {
            root: root.to_path_buf(),
            files,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Candidate files in scan order
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Find the value for a reference
    ///
    /// Scanning stops at the first document matching kind and name, even if
    /// it lacks the requested key (the value is then empty). Secret values are
    /// base64-decoded; an undecodable payload resolves to an empty string.
    pub fn resolve(&self, reference: &CanonicalReference) -> Result<String> {
        for path in &self.files {
            let content = std::fs::read(path).map_err(|source| CoreError::ResourceRead {
                path: path.clone(),
                source,
            })?;

            let Some(document) = find_document(&content, reference, path) else {
                continue;
            };

            debug!(
                root = %self.root().display(),
                file = %path.display(),
                kind = %reference.kind,
                name = %reference.name,
                "Resource for valuesFrom matched"
            );

            let raw = document.value_for(&reference.key);
            return Ok(match reference.kind {
                ValuesFromKind::ConfigMap => raw,
                ValuesFromKind::Secret => decode_secret_value(&raw, reference),
            });
        }

        Err(CoreError::ValuesNotFound {
            reference: reference.clone(),
        })
    }
}

/// First document in `content` matching the reference
///
/// Documents that do not deserialize as a resource are skipped.
fn find_document(content: &[u8], reference: &CanonicalReference, path: &Path) -> Option<ResourceDocument> {
    for document in serde_yaml::Deserializer::from_slice(content) {
        match ResourceDocument::deserialize(document) {
            Ok(resource) if resource.matches(reference) => return Some(resource),
            Ok(resource) => trace!(
                file = %path.display(),
                kind = resource.kind.as_deref().unwrap_or_default(),
                name = resource.metadata.name.as_deref().unwrap_or_default(),
                "Skipping non-matching resource"
            ),
            Err(err) => trace!(file = %path.display(), error = %err, "Skipping unreadable document"),
        }
    }
    None
}

/// Decode a base64 Secret payload, falling back to an empty string
fn decode_secret_value(raw: &str, reference: &CanonicalReference) -> String {
    // Line breaks are allowed inside base64 payloads
    let compact: String = raw.chars().filter(|c| *c != '\n' && *c != '\r').collect();

    match base64::engine::general_purpose::STANDARD.decode(compact.as_bytes()) {
        Ok(bytes) => String::from_utf8(bytes).unwrap_or_else(|err| {
            warn!(
                reference = %reference,
                error = %err,
                "Secret value is not valid UTF-8, replacing invalid bytes"
            );
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }),
        Err(err) => {
            warn!(
                reference = %reference,
                error = %err,
                "Secret value is not valid base64, using empty values"
            );
            String::new()
        }
    }
}
