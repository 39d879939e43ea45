//! Error types for parse-cache operations.

use std::path::PathBuf;

use concord_document::DocumentError;

/// Errors that can occur during parse-cache operations.
///
/// Cache *writes* are best-effort and never surface here; they are
/// reported through the warning channel on
/// [`CachedParse`](crate::CachedParse). Reads are strict: a disk entry
/// that exists but cannot be restored into a valid document is corruption,
/// not a miss.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// An I/O error occurred while reading a cache entry.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        /// The cache entry path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A disk entry failed to deserialize or failed re-validation against
    /// the document's structural predicate.
    #[error("corrupted cache entry at {path}: {reason}")]
    Corrupted {
        /// The cache entry path.
        path: PathBuf,
        /// Why the entry was rejected.
        reason: String,
    },

    /// The external parser rejected the source text.
    #[error(transparent)]
    Document(#[from] DocumentError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_display() {
        let err = CacheError::Io {
            path: PathBuf::from(".concord/starwars/character-information/swapi-abc.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("cache I/O error"));
        assert!(msg.contains("swapi-abc.json"));
    }

    #[test]
    fn corrupted_display() {
        let err = CacheError::Corrupted {
            path: PathBuf::from("entry.json"),
            reason: "ast metadata declares kind 'map'".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("corrupted cache entry"));
        assert!(msg.contains("declares kind 'map'"));
    }
}
