//! End-to-end valuesFrom run
//!
//! All references are resolved before any temp file is written, so a
//! missing non-optional reference leaves nothing behind.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::Result;
use crate::materialize::{format_values_flags, materialize};
use crate::reference::extract_references;
use crate::release::HelmRelease;
use crate::resolver::ValuesDirectory;

/// Inputs of a single run
#[derive(Debug, Clone)]
pub struct ValuesFromRun {
    /// HelmRelease manifest to read `valuesFrom` from
    pub manifest: PathBuf,
    /// Directory with ConfigMap and Secret manifests
    pub values_dir: PathBuf,
    /// Directory receiving the resolved values files
    pub temp_dir: PathBuf,
}

/// Files written by a successful run, in `valuesFrom` order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutput {
    pub files: Vec<PathBuf>,
}

impl RunOutput {
    /// Command-line fragment for helm
    pub fn flags(&self) -> String {
        format_values_flags(&self.files)
    }
}

impl ValuesFromRun {
    pub fn new(
        manifest: impl Into<PathBuf>,
        values_dir: impl Into<PathBuf>,
        temp_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            manifest: manifest.into(),
            values_dir: values_dir.into(),
            temp_dir: temp_dir.into(),
        }
    }

    /// Resolve every reference of the manifest and write the values files
    pub fn execute(&self) -> Result<RunOutput> {
        // The values directory is checked before the manifest is touched
        let directory = ValuesDirectory::open(&self.values_dir)?;
        let release = HelmRelease::from_file(&self.manifest)?;

        let resolved = resolve_all(&release, &directory)?;
        write_all(&self.temp_dir, &resolved)
    }
}

/// Resolve the release's references, dropping optional misses
pub fn resolve_all(release: &HelmRelease, directory: &ValuesDirectory) -> Result<Vec<String>> {
    let references = extract_references(release);
    debug!(
        release = release.metadata.name.as_deref().unwrap_or_default(),
        count = references.len(),
        "Extracted valuesFrom references"
    );

    let mut resolved = Vec::with_capacity(references.len());
    for reference in &references {
        match directory.resolve(reference) {
            Ok(values) => resolved.push(values),
            Err(err) if err.is_values_not_found() && reference.optional => {
                info!(reference = %reference, "Skipping missing optional valuesFrom");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(resolved)
}

fn write_all(temp_dir: &Path, resolved: &[String]) -> Result<RunOutput> {
    let files = resolved
        .iter()
        .map(|values| materialize(temp_dir, values))
        .collect::<Result<Vec<_>>>()?;
    Ok(RunOutput { files })
}
