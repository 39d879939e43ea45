//! Manifest types deserialized from `concord.toml`.

use concord_common::{ProfileId, ProfileVersion};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::ManifestError;

/// The raw project manifest parsed from `concord.toml`.
///
/// Profile keys are identity strings (`scope/name`), provider keys are
/// provider names. Registered files are manifest-relative paths.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectManifest {
    /// Registered profiles, keyed by identity.
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileEntry>,
    /// Registered providers, keyed by name.
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderEntry>,
}

/// A registered profile.
#[derive(Debug, Deserialize)]
pub struct ProfileEntry {
    /// Pinned profile version, e.g. `"1.0.3"`.
    pub version: String,
    /// Optional local file holding the profile source or compiled AST.
    #[serde(default)]
    pub file: Option<String>,
    /// Providers this profile has maps for.
    #[serde(default)]
    pub providers: BTreeMap<String, ProfileProviderEntry>,
}

impl ProfileEntry {
    /// The pinned version, parsed.
    ///
    /// Validation guarantees this parses, so callers after
    /// [`load_manifest`](crate::load_manifest) can rely on it.
    pub fn pinned_version(&self) -> Result<ProfileVersion, ManifestError> {
        self.version
            .parse()
            .map_err(|_| ManifestError::InvalidVersion {
                key: self.version.clone(),
            })
    }
}

/// A map registration under a profile, keyed by provider name.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileProviderEntry {
    /// Optional local file holding the map source or compiled AST.
    #[serde(default)]
    pub file: Option<String>,
}

/// A registered provider.
#[derive(Debug, Default, Deserialize)]
pub struct ProviderEntry {
    /// Optional local file holding the provider descriptor JSON.
    #[serde(default)]
    pub file: Option<String>,
    /// Configured integration parameter values.
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
}

/// A loaded manifest together with the directory it was loaded from.
///
/// All file registrations in the manifest are relative to that directory;
/// [`resolve_path`](Manifest::resolve_path) turns them into absolute paths.
#[derive(Debug)]
pub struct Manifest {
    /// The parsed manifest contents.
    pub project: ProjectManifest,
    /// The directory containing `concord.toml`.
    pub root: PathBuf,
}

impl Manifest {
    /// Wraps a parsed manifest with its root directory.
    pub fn new(project: ProjectManifest, root: impl Into<PathBuf>) -> Self {
        Self {
            project,
            root: root.into(),
        }
    }

    /// Looks up the entry for a profile by identity (`scope/name`).
    pub fn profile_entry(&self, id: &ProfileId) -> Option<&ProfileEntry> {
        self.project.profiles.get(&id.identity())
    }

    /// Looks up the map registration for a (profile, provider) pair.
    pub fn map_entry(&self, id: &ProfileId, provider: &str) -> Option<&ProfileProviderEntry> {
        self.profile_entry(id)?.providers.get(provider)
    }

    /// Looks up the entry for a provider by name.
    pub fn provider_entry(&self, name: &str) -> Option<&ProviderEntry> {
        self.project.providers.get(name)
    }

    /// Resolves a manifest-relative path against the manifest root.
    ///
    /// Absolute registrations are returned unchanged.
    pub fn resolve_path(&self, registered: &str) -> PathBuf {
        let path = Path::new(registered);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// The conventional local profile directory (`<root>/profiles`).
    ///
    /// Scanned when a profile has no explicit file registration, to support
    /// the "just dropped into the project" workflow.
    pub fn profile_dir(&self) -> PathBuf {
        self.root.join("profiles")
    }
}
