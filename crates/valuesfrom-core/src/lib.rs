//! valuesfrom-core - Flux `valuesFrom` resolution for offline Helm rendering
//!
//! This crate turns the `spec.valuesFrom` list of a Flux HelmRelease into
//! values files that can be passed to `helm template`:
//! - `HelmRelease`: The parsed release manifest
//! - `CanonicalReference`: A valuesFrom entry with defaults applied
//! - `ValuesDirectory`: Lookup of ConfigMaps and Secrets on disk
//! - `materialize`: Temp values files and the `-f` flag string
//! - `ValuesFromRun`: The whole pipeline

pub mod error;
pub mod materialize;
pub mod pipeline;
pub mod reference;
pub mod release;
pub mod resolver;

pub use error::{CoreError, Result};
pub use materialize::{format_values_flags, materialize};
pub use pipeline::{RunOutput, ValuesFromRun, resolve_all};
pub use reference::{CanonicalReference, DEFAULT_VALUES_KEY, ValuesFromKind, extract_references};
pub use release::{HelmRelease, HelmReleaseSpec, ReleaseMetadata, ResourceKeySelector, ValuesFromSource};
pub use resolver::{ResourceDocument, ResourceMetadata, ValuesDirectory};
