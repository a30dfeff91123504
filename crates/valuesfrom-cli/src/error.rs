//! CLI error types with exit code handling
//!
//! Core errors are converted into [`CliError`] at the top-level boundary,
//! which renders them through miette and maps them to exit codes.

use miette::Diagnostic;
use thiserror::Error;
use valuesfrom_core::CoreError;

use crate::exit_codes;

#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Missing or unusable positional argument
    #[error("Invalid arguments: {message}")]
    #[diagnostic(code(valuesfrom::cli::arguments))]
    InvalidArguments {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// HelmRelease could not be read or parsed
    #[error("Manifest error: {message}")]
    #[diagnostic(code(valuesfrom::cli::manifest))]
    Manifest {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// A non-optional reference did not resolve
    #[error("Could not find values for non-optional valuesFrom: {message}")]
    #[diagnostic(code(valuesfrom::cli::values_not_found))]
    ValuesNotFound {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// IO error (resource read, temp file write, stdout)
    #[error("IO error: {message}")]
    #[diagnostic(code(valuesfrom::cli::io))]
    Io { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArguments { .. } => exit_codes::USAGE_ERROR,
            CliError::Manifest { .. } => exit_codes::MANIFEST_ERROR,
            CliError::ValuesNotFound { .. } => exit_codes::VALUES_NOT_FOUND,
            CliError::Io { .. } => exit_codes::IO_ERROR,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValuesDirNotFound { .. } => CliError::InvalidArguments {
                message: err.to_string(),
                help: Some("VALUES_DIR must be an existing directory of ConfigMap/Secret manifests".to_string()),
            },
            CoreError::ManifestRead { .. } | CoreError::MalformedManifest(_) => CliError::Manifest {
                message: err.to_string(),
                help: Some("MANIFEST must be a single YAML document describing a HelmRelease".to_string()),
            },
            CoreError::ValuesNotFound { reference } => CliError::ValuesNotFound {
                help: Some(format!(
                    "add a {} named '{}' to the values directory or mark the reference optional",
                    reference.kind, reference.name
                )),
                message: reference.to_string(),
            },
            CoreError::ResourceRead { .. } | CoreError::TempFileWrite { .. } => CliError::Io {
                message: err.to_string(),
            },
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
