//! Provenance records for resolved artifacts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Where a resolved artifact came from.
///
/// Attached to every resolved Profile, Map, and Provider and carried
/// through to reports, so a reader can tell whether a discrepancy
/// originates from a stale local file or a stale registry entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Provenance {
    /// The artifact was read from a local file.
    Local {
        /// The path it was read from.
        path: PathBuf,
    },
    /// The artifact was fetched from the remote registry.
    Remote {
        /// The version the registry resolved the request to.
        version: String,
    },
}

impl Provenance {
    /// Creates a local provenance record.
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self::Local { path: path.into() }
    }

    /// Creates a remote provenance record for the given resolved version.
    pub fn remote(version: impl Into<String>) -> Self {
        Self::Remote {
            version: version.into(),
        }
    }

    /// Returns `true` for locally resolved artifacts.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local { .. })
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local { path } => write!(f, "{}", path.display()),
            Self::Remote { version } => write!(f, "remote version v{version}"),
        }
    }
}
