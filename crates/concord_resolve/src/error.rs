//! Resolution errors.

use std::path::PathBuf;

use concord_cache::CacheError;
use concord_check::CheckError;
use concord_document::DocumentError;
use concord_manifest::ManifestError;

/// A fatal error while resolving or checking one capability.
///
/// Fatal means the capability it belongs to; the session turns it into a
/// failed report entry and moves on to the next one.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Every source was tried and none had the artifact.
    #[error("{artifact} not found: {looked}")]
    NotFound {
        /// What was being resolved.
        artifact: String,
        /// The locations that were tried, for the diagnostic.
        looked: String,
    },

    /// The conventional profile directory matched more than one file.
    #[error(
        "profile '{name}' matches {} files under {dir}: register one explicitly in concord.toml",
        .candidates.len()
    )]
    AmbiguousLocalProfile {
        /// Profile identity being resolved.
        name: String,
        /// The directory that was scanned.
        dir: PathBuf,
        /// Every matching file, sorted.
        candidates: Vec<PathBuf>,
    },

    /// A registered or scanned file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying io error.
        #[source]
        source: std::io::Error,
    },

    /// The parse cache failed (corruption included).
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// A document failed to parse or validate.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The manifest entry for the artifact is itself invalid.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// A checker precondition failed.
    #[error(transparent)]
    Check(#[from] CheckError),

    /// The registry request failed for a reason other than absence.
    #[error("registry request for {artifact} failed: {reason}")]
    Registry {
        /// What was being fetched.
        artifact: String,
        /// Transport-level failure description.
        reason: String,
    },

    /// One provider name resolved to two different descriptors in the
    /// same session.
    #[error("provider name '{name}' resolved to conflicting descriptors in this session")]
    DuplicateProvider {
        /// The clashing provider name.
        name: String,
    },
}
