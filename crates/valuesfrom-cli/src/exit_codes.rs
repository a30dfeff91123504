//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

/// A required valuesFrom reference has no matching ConfigMap or Secret
pub const VALUES_NOT_FOUND: i32 = 3;

/// Manifest error - HelmRelease unreadable or not valid YAML
pub const MANIFEST_ERROR: i32 = 4;

/// IO error - resource file unreadable, temp file not writable
pub const IO_ERROR: i32 = 5;

/// Usage error - invalid arguments (following sysexits.h convention)
pub const USAGE_ERROR: i32 = 64;
