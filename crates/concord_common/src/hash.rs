//! Content hashing for parse-cache keys and invalidation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 128-bit content hash computed using XXH3.
///
/// Two sources with the same `ContentHash` are assumed to have identical
/// content. Used to key cached parse results and to detect when a local
/// artifact has changed since it was last parsed. This is a cache key, not
/// a security boundary.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Computes a content hash from a byte slice using XXH3-128.
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = xxhash_rust::xxh3::xxh3_128(data);
        Self(hash.to_le_bytes())
    }

    /// Computes a content hash of a UTF-8 source text.
    pub fn from_source(source: &str) -> Self {
        Self::from_bytes(source.as_bytes())
    }

    /// Returns the first twelve hex characters of the hash.
    ///
    /// Used in cache file names, where the full 32 characters would only
    /// add noise: within one artifact directory a 48-bit prefix is enough
    /// to distinguish revisions of the same document.
    pub fn short(&self) -> String {
        let full = self.to_string();
        full[..12].to_string()
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}
