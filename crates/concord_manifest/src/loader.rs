//! Manifest file loading and validation.

use concord_common::{ProfileId, ProfileVersion};
use std::path::Path;

use crate::error::ManifestError;
use crate::types::{Manifest, ProjectManifest};

/// Name of the manifest file within a project directory.
pub const MANIFEST_FILE: &str = "concord.toml";

/// Loads and validates a `concord.toml` from a project directory.
pub fn load_manifest(project_dir: &Path) -> Result<Manifest, ManifestError> {
    let content = std::fs::read_to_string(project_dir.join(MANIFEST_FILE))?;
    let project = load_manifest_from_str(&content)?;
    Ok(Manifest::new(project, project_dir))
}

/// Parses and validates manifest contents from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_manifest_from_str(content: &str) -> Result<ProjectManifest, ManifestError> {
    let manifest: ProjectManifest =
        toml::from_str(content).map_err(|e| ManifestError::Parse(e.to_string()))?;
    validate_manifest(&manifest)?;
    Ok(manifest)
}

/// Validates profile keys and pinned version strings.
fn validate_manifest(manifest: &ProjectManifest) -> Result<(), ManifestError> {
    for (key, entry) in &manifest.profiles {
        let id: ProfileId = key.parse().map_err(|_| ManifestError::InvalidProfileKey {
            key: key.clone(),
        })?;
        if id.version.is_some() {
            // Versions are pinned by the `version` field, not the key.
            return Err(ManifestError::InvalidProfileKey { key: key.clone() });
        }
        entry
            .version
            .parse::<ProfileVersion>()
            .map_err(|_| ManifestError::InvalidVersion {
                key: entry.version.clone(),
            })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_manifest() {
        let manifest = load_manifest_from_str(
            r#"
[profiles."starwars/character-information"]
version = "1.0.3"
"#,
        )
        .unwrap();
        assert_eq!(manifest.profiles.len(), 1);
        assert!(manifest.providers.is_empty());
    }

    #[test]
    fn parse_empty_manifest() {
        let manifest = load_manifest_from_str("").unwrap();
        assert!(manifest.profiles.is_empty());
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_manifest_from_str("this is not toml {{{").unwrap_err();
        assert!(matches!(err, ManifestError::Parse(_)));
    }

    #[test]
    fn versioned_profile_key_errors() {
        let err = load_manifest_from_str(
            r#"
[profiles."starwars/character-information@1.0.3"]
version = "1.0.3"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ManifestError::InvalidProfileKey { .. }));
    }

    #[test]
    fn bad_pinned_version_errors() {
        let err = load_manifest_from_str(
            r#"
[profiles."starwars/character-information"]
version = "1.0"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ManifestError::InvalidVersion { .. }));
    }

    #[test]
    fn load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"
[providers.swapi]
file = "providers/swapi.json"
"#,
        )
        .unwrap();
        let manifest = load_manifest(dir.path()).unwrap();
        assert_eq!(manifest.root, dir.path());
        assert!(manifest.provider_entry("swapi").is_some());
    }

    #[test]
    fn missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_manifest(dir.path()).unwrap_err();
        assert!(matches!(err, ManifestError::Io(_)));
    }
}
