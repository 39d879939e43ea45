//! Parsing and validation of `concord.toml` project manifests.
//!
//! The manifest maps profile and provider identifiers to pinned versions,
//! optional local files, and configured integration parameter values. The
//! resolver consults it before going to the registry.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ManifestError;
pub use loader::{load_manifest, load_manifest_from_str, MANIFEST_FILE};
pub use types::{Manifest, ProfileEntry, ProfileProviderEntry, ProjectManifest, ProviderEntry};
