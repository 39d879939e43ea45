//! Cache identities and on-disk key derivation.

use concord_common::{ContentHash, MapId, ProfileId};
use std::path::PathBuf;

/// The logical identity of a cached document.
///
/// A profile is identified by `scope/name`; a map additionally carries the
/// provider it targets. Two identities share an entry directory exactly
/// when they belong to the same profile, and share a file-name prefix
/// exactly when they are the same logical document — which is what makes
/// stale-sibling eviction safe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheIdentity {
    /// Optional profile scope.
    pub scope: Option<String>,
    /// Profile name.
    pub name: String,
    /// Provider name, for map documents.
    pub provider: Option<String>,
}

impl CacheIdentity {
    /// Identity of a profile document.
    pub fn profile(id: &ProfileId) -> Self {
        Self {
            scope: id.scope.clone(),
            name: id.name.clone(),
            provider: None,
        }
    }

    /// Identity of a map document.
    pub fn map(id: &MapId) -> Self {
        Self {
            scope: id.profile.scope.clone(),
            name: id.profile.name.clone(),
            provider: Some(id.provider.clone()),
        }
    }

    /// The entry directory relative to the cache root: `scope/name`.
    pub fn entry_dir(&self) -> PathBuf {
        match &self.scope {
            Some(scope) => PathBuf::from(scope).join(&self.name),
            None => PathBuf::from(&self.name),
        }
    }

    /// The file-name prefix shared by all revisions of this document.
    pub fn file_prefix(&self) -> &str {
        self.provider.as_deref().unwrap_or("profile")
    }

    /// The cache file name for a given source hash.
    pub fn file_name(&self, hash: ContentHash) -> String {
        format!("{}-{}.json", self.file_prefix(), hash.short())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_common::MapVersion;

    #[test]
    fn profile_identity_key_shape() {
        let id: ProfileId = "starwars/character-information@1.0.3".parse().unwrap();
        let identity = CacheIdentity::profile(&id);
        assert_eq!(
            identity.entry_dir(),
            PathBuf::from("starwars/character-information")
        );
        assert_eq!(identity.file_prefix(), "profile");

        let hash = ContentHash::from_source("profile source");
        let name = identity.file_name(hash);
        assert!(name.starts_with("profile-"));
        assert!(name.ends_with(".json"));
    }

    #[test]
    fn map_identity_uses_provider_prefix() {
        let map_id = MapId {
            profile: "starwars/character-information".parse().unwrap(),
            provider: "swapi".to_string(),
            version: MapVersion { major: 1, minor: 0 },
            variant: None,
        };
        let identity = CacheIdentity::map(&map_id);
        assert_eq!(identity.file_prefix(), "swapi");
        assert_eq!(
            identity.entry_dir(),
            PathBuf::from("starwars/character-information")
        );
    }

    #[test]
    fn unscoped_profile_dir_is_name_only() {
        let id: ProfileId = "character-information".parse().unwrap();
        let identity = CacheIdentity::profile(&id);
        assert_eq!(identity.entry_dir(), PathBuf::from("character-information"));
    }

    #[test]
    fn same_identity_different_hash_shares_prefix() {
        let id: ProfileId = "starwars/character-information".parse().unwrap();
        let identity = CacheIdentity::profile(&id);
        let a = identity.file_name(ContentHash::from_source("rev a"));
        let b = identity.file_name(ContentHash::from_source("rev b"));
        assert_ne!(a, b);
        assert!(a.starts_with("profile-") && b.starts_with("profile-"));
    }
}
