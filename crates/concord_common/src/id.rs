//! Artifact identifiers: profile ids, profile versions, and map ids.
//!
//! These are the immutable value types a caller hands to the resolver. A
//! profile's identity is `scope/name`; the version is optional and defaults
//! per context (e.g. to the version pinned in the project manifest).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A full profile version: `major.minor.patch` with an optional label.
///
/// Parsed from strings like `1.0.3` or `2.1.0-beta`. Only `major` and
/// `minor` participate in profile/map consistency checks; `patch` and
/// `label` are informational and may diverge between documents.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileVersion {
    /// Major version component.
    pub major: u64,
    /// Minor version component.
    pub minor: u64,
    /// Patch version component.
    pub patch: u64,
    /// Optional pre-release label (the part after `-`).
    pub label: Option<String>,
}

impl ProfileVersion {
    /// Creates a version without a label.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            label: None,
        }
    }
}

impl fmt::Display for ProfileVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(label) = &self.label {
            write!(f, "-{label}")?;
        }
        Ok(())
    }
}

impl FromStr for ProfileVersion {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseIdError {
            input: s.to_string(),
            expected: "major.minor.patch[-label]",
        };

        let (numbers, label) = match s.split_once('-') {
            Some((n, l)) if !l.is_empty() => (n, Some(l.to_string())),
            Some(_) => return Err(err()),
            None => (s, None),
        };

        let mut parts = numbers.split('.');
        let major = parts.next().ok_or_else(err)?.parse().map_err(|_| err())?;
        let minor = parts.next().ok_or_else(err)?.parse().map_err(|_| err())?;
        let patch = parts.next().ok_or_else(err)?.parse().map_err(|_| err())?;
        if parts.next().is_some() {
            return Err(err());
        }

        Ok(Self {
            major,
            minor,
            patch,
            label,
        })
    }
}

/// A map revision: `major.minor` only.
///
/// Maps are versioned independently of the profile they implement; the
/// major component is expected to track the profile's major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapVersion {
    /// Major version component.
    pub major: u64,
    /// Minor version component.
    pub minor: u64,
}

impl fmt::Display for MapVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for MapVersion {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseIdError {
            input: s.to_string(),
            expected: "major.minor",
        };
        let (major, minor) = s.split_once('.').ok_or_else(err)?;
        Ok(Self {
            major: major.parse().map_err(|_| err())?,
            minor: minor.parse().map_err(|_| err())?,
        })
    }
}

/// Identifies a profile: optional scope, name, optional version.
///
/// Identity is `scope/name`; two ids with different versions still refer
/// to the same profile. Parsed from strings like
/// `starwars/character-information@1.0.3`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileId {
    /// Optional scope (the part before `/`).
    pub scope: Option<String>,
    /// Profile name.
    pub name: String,
    /// Requested version; `None` means "default per context".
    pub version: Option<ProfileVersion>,
}

impl ProfileId {
    /// Creates an unversioned id from optional scope and name.
    pub fn new(scope: Option<&str>, name: &str) -> Self {
        Self {
            scope: scope.map(str::to_string),
            name: name.to_string(),
            version: None,
        }
    }

    /// Returns this id with the given version attached.
    pub fn with_version(mut self, version: ProfileVersion) -> Self {
        self.version = Some(version);
        self
    }

    /// The identity string `scope/name` (or just `name` without a scope).
    ///
    /// This is also the manifest lookup key and the cache directory path
    /// component for the profile.
    pub fn identity(&self) -> String {
        match &self.scope {
            Some(scope) => format!("{scope}/{}", self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identity())?;
        if let Some(version) = &self.version {
            write!(f, "@{version}")?;
        }
        Ok(())
    }
}

impl FromStr for ProfileId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseIdError {
            input: s.to_string(),
            expected: "[scope/]name[@version]",
        };

        let (identity, version) = match s.split_once('@') {
            Some((i, v)) => (i, Some(v.parse::<ProfileVersion>()?)),
            None => (s, None),
        };

        let (scope, name) = match identity.split_once('/') {
            Some((scope, name)) => (Some(scope), name),
            None => (None, identity),
        };
        if name.is_empty() || scope.is_some_and(str::is_empty) || name.contains('/') {
            return Err(err());
        }

        Ok(Self {
            scope: scope.map(str::to_string),
            name: name.to_string(),
            version,
        })
    }
}

/// Identifies a map: the profile it implements, the provider it targets,
/// its own revision, and an optional variant.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapId {
    /// The profile this map implements.
    pub profile: ProfileId,
    /// The provider name this map targets.
    pub provider: String,
    /// The map revision.
    pub version: MapVersion,
    /// Optional variant distinguishing alternative maps for one provider.
    pub variant: Option<String>,
}

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.profile.identity(), self.provider)?;
        if let Some(variant) = &self.variant {
            write!(f, ".{variant}")?;
        }
        write!(f, "@{}", self.version)
    }
}

/// Error type for parsing artifact identifier strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid identifier '{input}': expected {expected}")]
pub struct ParseIdError {
    /// The input string that failed to parse.
    pub input: String,
    /// The shape the parser expected.
    pub expected: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_version() {
        let v: ProfileVersion = "1.0.3".parse().unwrap();
        assert_eq!(v, ProfileVersion::new(1, 0, 3));
        assert_eq!(v.to_string(), "1.0.3");
    }

    #[test]
    fn parse_version_with_label() {
        let v: ProfileVersion = "2.1.0-beta".parse().unwrap();
        assert_eq!(v.major, 2);
        assert_eq!(v.label.as_deref(), Some("beta"));
        assert_eq!(v.to_string(), "2.1.0-beta");
    }

    #[test]
    fn parse_version_rejects_garbage() {
        assert!("1.0".parse::<ProfileVersion>().is_err());
        assert!("1.0.x".parse::<ProfileVersion>().is_err());
        assert!("1.0.3.4".parse::<ProfileVersion>().is_err());
        assert!("1.0.3-".parse::<ProfileVersion>().is_err());
    }

    #[test]
    fn parse_map_version() {
        let v: MapVersion = "1.2".parse().unwrap();
        assert_eq!(v, MapVersion { major: 1, minor: 2 });
        assert_eq!(v.to_string(), "1.2");
        assert!("3".parse::<MapVersion>().is_err());
    }

    #[test]
    fn parse_scoped_profile_id() {
        let id: ProfileId = "starwars/character-information@1.0.3".parse().unwrap();
        assert_eq!(id.scope.as_deref(), Some("starwars"));
        assert_eq!(id.name, "character-information");
        assert_eq!(id.version, Some(ProfileVersion::new(1, 0, 3)));
        assert_eq!(id.to_string(), "starwars/character-information@1.0.3");
    }

    #[test]
    fn parse_bare_profile_id() {
        let id: ProfileId = "character-information".parse().unwrap();
        assert!(id.scope.is_none());
        assert!(id.version.is_none());
        assert_eq!(id.identity(), "character-information");
    }

    #[test]
    fn parse_profile_id_rejects_garbage() {
        assert!("".parse::<ProfileId>().is_err());
        assert!("/name".parse::<ProfileId>().is_err());
        assert!("scope/".parse::<ProfileId>().is_err());
        assert!("a/b/c".parse::<ProfileId>().is_err());
        assert!("scope/name@1".parse::<ProfileId>().is_err());
    }

    #[test]
    fn identity_ignores_version() {
        let a: ProfileId = "starwars/character-information@1.0.3".parse().unwrap();
        let b: ProfileId = "starwars/character-information".parse().unwrap();
        assert_eq!(a.identity(), b.identity());
    }

    #[test]
    fn map_id_display() {
        let id = MapId {
            profile: "starwars/character-information".parse().unwrap(),
            provider: "swapi".to_string(),
            version: MapVersion { major: 1, minor: 0 },
            variant: None,
        };
        assert_eq!(id.to_string(), "starwars/character-information.swapi@1.0");

        let with_variant = MapId {
            variant: Some("generated".to_string()),
            ..id
        };
        assert_eq!(
            with_variant.to_string(),
            "starwars/character-information.swapi.generated@1.0"
        );
    }

    #[test]
    fn serde_roundtrip() {
        let id: ProfileId = "starwars/character-information@1.0.3".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        let back: ProfileId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
