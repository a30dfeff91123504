//! Temporary values files and the `-f` flag string

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

use crate::error::{CoreError, Result};

/// Write `values` to a freshly named `<uuid>.yaml` file inside `temp_dir`
///
/// The file is created exclusively, so an existing file is never
/// overwritten. Returns the absolute path of the new file.
pub fn materialize(temp_dir: &Path, values: &str) -> Result<PathBuf> {
    let path = temp_dir.join(format!("{}.yaml", Uuid::new_v4()));
    let path = std::path::absolute(&path).map_err(|source| CoreError::TempFileWrite {
        path: path.clone(),
        source,
    })?;

    let write = || -> std::io::Result<()> {
        let mut file = OpenOptions::new().write(true).create_new(true).open(&path)?;
        file.write_all(values.as_bytes())?;
        file.flush()
    };
    write().map_err(|source| CoreError::TempFileWrite {
        path: path.clone(),
        source,
    })?;

    debug!(file = %path.display(), bytes = values.len(), "Wrote temp values file");
    Ok(path)
}

/// Render ` -f <path>` for every file, or an empty string when there are none
pub fn format_values_flags(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| format!(" -f {}", path.display()))
        .collect()
}
