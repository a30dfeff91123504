//! Core error types

use std::path::PathBuf;
use thiserror::Error;

use crate::reference::CanonicalReference;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Directory with valuesFrom not found or is not a directory: {}", path.display())]
    ValuesDirNotFound { path: PathBuf },

    #[error("Failed to read HelmRelease {}: {source}", path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse HelmRelease: {0}")]
    MalformedManifest(#[from] serde_yaml::Error),

    #[error("No values found for valuesFrom reference {reference}")]
    ValuesNotFound { reference: CanonicalReference },

    #[error("Failed to read resource file {}: {source}", path.display())]
    ResourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to write temp values file {}: {source}", path.display())]
    TempFileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CoreError {
    /// Whether this is a lookup miss, which optional references tolerate
    pub fn is_values_not_found(&self) -> bool {
        matches!(self, Self::ValuesNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
