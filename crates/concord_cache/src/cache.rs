//! The two-level parse cache.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use concord_common::ContentHash;
use concord_document::{Document, DocumentError};

use crate::error::CacheError;
use crate::key::CacheIdentity;

/// Which cache level satisfied a lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheSource {
    /// Served from the in-process map.
    Memory,
    /// Restored from an on-disk entry.
    Disk,
    /// Freshly parsed via the external parser.
    Parsed,
}

/// The result of a cache lookup or parse.
#[derive(Debug)]
pub struct CachedParse<D> {
    /// The parsed (or restored) document.
    pub document: D,
    /// Which level produced it.
    pub source: CacheSource,
    /// Set when a best-effort disk write or eviction failed.
    ///
    /// The parse itself still succeeded; this exists so a permanently
    /// broken cache directory is diagnosable instead of silent.
    pub write_warning: Option<String>,
}

/// A session-scoped parse cache for one document type.
///
/// Owned explicitly by the checking session and passed into resolver
/// calls; there is no ambient module state. Lookup order is memory, then
/// disk, then the supplied parse function. Disk entries are JSON files at
/// `<cache_dir>/<scope>/<name>/<provider-or-profile>-<hash12>.json`; a hit
/// must still satisfy the document's structural predicate, otherwise it is
/// reported as corruption rather than silently ignored.
pub struct ParseCache<D> {
    /// Root directory for on-disk entries.
    cache_dir: PathBuf,
    /// In-process memoization, keyed by entry-relative file path.
    memory: HashMap<PathBuf, D>,
}

impl<D: Document> ParseCache<D> {
    /// Creates a cache rooted at the given directory.
    ///
    /// The directory is created lazily on first write.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            memory: HashMap::new(),
        }
    }

    /// Returns the cached document for `source_text`, parsing at most once.
    ///
    /// Before a freshly parsed result is written, all sibling entries for
    /// the same identity (stale hashes) are deleted, so only one cached
    /// artifact exists per logical document at a time.
    pub fn get_or_parse<F>(
        &mut self,
        source_text: &str,
        identity: &CacheIdentity,
        parse: F,
    ) -> Result<CachedParse<D>, CacheError>
    where
        F: FnOnce(&str) -> Result<D, DocumentError>,
    {
        let hash = ContentHash::from_source(source_text);
        let entry_dir = self.cache_dir.join(identity.entry_dir());
        let entry_path = entry_dir.join(identity.file_name(hash));

        if let Some(document) = self.memory.get(&entry_path) {
            return Ok(CachedParse {
                document: document.clone(),
                source: CacheSource::Memory,
                write_warning: None,
            });
        }

        if entry_path.is_file() {
            let document = self.load_entry(&entry_path)?;
            self.memory.insert(entry_path, document.clone());
            return Ok(CachedParse {
                document,
                source: CacheSource::Disk,
                write_warning: None,
            });
        }

        let document = parse(source_text)?;
        document.validate()?;

        let write_warning = self.write_entry(&entry_dir, &entry_path, identity, &document);
        self.memory.insert(entry_path, document.clone());

        Ok(CachedParse {
            document,
            source: CacheSource::Parsed,
            write_warning,
        })
    }

    /// Restores and re-validates a disk entry.
    fn load_entry(&self, path: &Path) -> Result<D, CacheError> {
        let content = std::fs::read_to_string(path).map_err(|e| CacheError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let document: D =
            serde_json::from_str(&content).map_err(|e| CacheError::Corrupted {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        document.validate().map_err(|e| CacheError::Corrupted {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(document)
    }

    /// Evicts stale siblings and writes the fresh entry, best-effort.
    ///
    /// Returns a description of the first failure, if any; the caller's
    /// parse result is unaffected either way.
    fn write_entry(
        &self,
        entry_dir: &Path,
        entry_path: &Path,
        identity: &CacheIdentity,
        document: &D,
    ) -> Option<String> {
        if let Err(e) = std::fs::create_dir_all(entry_dir) {
            return Some(format!(
                "failed to create cache directory {}: {e}",
                entry_dir.display()
            ));
        }

        if let Some(warning) = evict_stale_siblings(entry_dir, entry_path, identity) {
            return Some(warning);
        }

        let json = match serde_json::to_string_pretty(document) {
            Ok(json) => json,
            Err(e) => return Some(format!("failed to serialize cache entry: {e}")),
        };
        if let Err(e) = std::fs::write(entry_path, json) {
            return Some(format!(
                "failed to write cache entry {}: {e}",
                entry_path.display()
            ));
        }
        None
    }
}

/// Deletes every entry in `entry_dir` that shares the identity's file
/// prefix but is not `keep`.
///
/// The cache directory assumes one live entry per logical document, so a
/// hash mismatch means every prior sibling is stale, not just one.
fn evict_stale_siblings(
    entry_dir: &Path,
    keep: &Path,
    identity: &CacheIdentity,
) -> Option<String> {
    let prefix = format!("{}-", identity.file_prefix());
    let entries = match std::fs::read_dir(entry_dir) {
        Ok(entries) => entries,
        Err(e) => {
            return Some(format!(
                "failed to list cache directory {}: {e}",
                entry_dir.display()
            ))
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let stale = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(&prefix))
            && path != keep;
        if stale {
            if let Err(e) = std::fs::remove_file(&path) {
                return Some(format!(
                    "failed to evict stale cache entry {}: {e}",
                    path.display()
                ));
            }
        }
    }
    None
}
