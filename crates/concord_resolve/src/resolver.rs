//! Source resolution: local registration, conventional directory, registry.
//!
//! Each resolver walks its sources in a fixed order and attaches a
//! provenance record to whatever it finds. Local profile and map files go
//! through the parse cache; provider descriptors are plain JSON and are
//! parsed directly.

use std::path::{Path, PathBuf};

use concord_cache::{CacheIdentity, ParseCache};
use concord_common::{MapId, ProfileId, Provenance};
use concord_document::{
    CompiledJsonParser, Document, DocumentParser, MapDocument, ProfileDocument,
    ProviderDescriptor,
};
use concord_manifest::{Manifest, MANIFEST_FILE};

use crate::error::ResolveError;
use crate::registry::{Registry, RegistryError};

/// A resolved artifact with its provenance.
#[derive(Clone, Debug)]
pub struct Resolved<D> {
    /// The resolved document.
    pub document: D,
    /// Where it came from.
    pub provenance: Provenance,
    /// Set when a best-effort cache write failed along the way.
    pub cache_warning: Option<String>,
}

/// Resolves a profile.
///
/// Order: the file registered in the manifest, then a scan of the
/// conventional `profiles/` directory (only when nothing is registered),
/// then the registry at the requested or pinned version. A scan matching
/// more than one file is fatal rather than picking silently.
pub async fn resolve_profile<R: Registry, P: DocumentParser>(
    manifest: &Manifest,
    registry: &R,
    parser: &P,
    cache: &mut ParseCache<ProfileDocument>,
    id: &ProfileId,
) -> Result<Resolved<ProfileDocument>, ResolveError> {
    let entry = manifest.profile_entry(id);

    let local_attempt;
    if let Some(file) = entry.and_then(|e| e.file.as_deref()) {
        let path = manifest.resolve_path(file);
        if path.is_file() {
            return parse_profile_file(parser, cache, id, &path);
        }
        local_attempt = format!(
            "file {} registered in {MANIFEST_FILE} does not exist",
            path.display()
        );
    } else if let Some(path) = scan_profile_dir(manifest, id)? {
        return parse_profile_file(parser, cache, id, &path);
    } else {
        local_attempt = format!(
            "not registered in {MANIFEST_FILE}, no match under {}",
            manifest.profile_dir().display()
        );
    }

    let requested = match (&id.version, entry) {
        (None, Some(entry)) => id.clone().with_version(entry.pinned_version()?),
        _ => id.clone(),
    };
    match registry.fetch_profile_ast(&requested).await {
        Ok(artifact) => {
            artifact.document.validate()?;
            Ok(Resolved {
                document: artifact.document,
                provenance: Provenance::remote(artifact.resolved_version),
                cache_warning: None,
            })
        }
        Err(RegistryError::NotFound { .. }) => Err(ResolveError::NotFound {
            artifact: format!("profile {id}"),
            looked: format!("{local_attempt}, and the registry has no entry"),
        }),
        Err(RegistryError::Transport { reason }) => Err(ResolveError::Registry {
            artifact: format!("profile {id}"),
            reason,
        }),
    }
}

/// Resolves a map.
///
/// Order: the file registered in the manifest under the profile's
/// provider entry, then the registry. There is no conventional directory
/// for maps.
pub async fn resolve_map<R: Registry, P: DocumentParser>(
    manifest: &Manifest,
    registry: &R,
    parser: &P,
    cache: &mut ParseCache<MapDocument>,
    id: &MapId,
) -> Result<Resolved<MapDocument>, ResolveError> {
    let entry = manifest.map_entry(&id.profile, &id.provider);
    let mut local_attempt = format!("not registered in {MANIFEST_FILE}");
    if let Some(file) = entry.and_then(|e| e.file.as_deref()) {
        let path = manifest.resolve_path(file);
        if path.is_file() {
            return parse_map_file(parser, cache, id, &path);
        }
        local_attempt = format!(
            "file {} registered in {MANIFEST_FILE} does not exist",
            path.display()
        );
    }

    match registry.fetch_map_ast(id).await {
        Ok(artifact) => {
            artifact.document.validate()?;
            Ok(Resolved {
                document: artifact.document,
                provenance: Provenance::remote(artifact.resolved_version),
                cache_warning: None,
            })
        }
        Err(RegistryError::NotFound { .. }) => Err(ResolveError::NotFound {
            artifact: format!("map {id}"),
            looked: format!("{local_attempt}, and the registry has no entry"),
        }),
        Err(RegistryError::Transport { reason }) => Err(ResolveError::Registry {
            artifact: format!("map {id}"),
            reason,
        }),
    }
}

/// Resolves a provider descriptor.
///
/// Order: the file registered in the manifest, then the registry.
/// Descriptors are small plain JSON, so they bypass the parse cache.
pub async fn resolve_provider<R: Registry>(
    manifest: &Manifest,
    registry: &R,
    name: &str,
) -> Result<Resolved<ProviderDescriptor>, ResolveError> {
    let mut local_attempt = format!("not registered in {MANIFEST_FILE}");
    if let Some(file) = manifest
        .provider_entry(name)
        .and_then(|e| e.file.as_deref())
    {
        let path = manifest.resolve_path(file);
        if path.is_file() {
            let source = read_source(&path)?;
            return Ok(Resolved {
                document: ProviderDescriptor::from_json(&source)?,
                provenance: Provenance::local(path),
                cache_warning: None,
            });
        }
        local_attempt = format!(
            "file {} registered in {MANIFEST_FILE} does not exist",
            path.display()
        );
    }

    match registry.fetch_provider_info(name).await {
        Ok(artifact) => {
            artifact.document.validate()?;
            Ok(Resolved {
                document: artifact.document,
                provenance: Provenance::remote(artifact.resolved_version),
                cache_warning: None,
            })
        }
        Err(RegistryError::NotFound { .. }) => Err(ResolveError::NotFound {
            artifact: format!("provider {name}"),
            looked: format!("{local_attempt}, and the registry has no entry"),
        }),
        Err(RegistryError::Transport { reason }) => Err(ResolveError::Registry {
            artifact: format!("provider {name}"),
            reason,
        }),
    }
}

/// Scans the conventional profile directory for `<name>.profile.json` or
/// `<name>@<version>.profile.json`.
fn scan_profile_dir(
    manifest: &Manifest,
    id: &ProfileId,
) -> Result<Option<PathBuf>, ResolveError> {
    let dir = manifest.profile_dir();
    if !dir.is_dir() {
        return Ok(None);
    }

    let exact = format!("{}.profile.json", id.name);
    let versioned = format!("{}@", id.name);
    let entries = std::fs::read_dir(&dir).map_err(|e| ResolveError::Io {
        path: dir.clone(),
        source: e,
    })?;

    let mut candidates = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name == exact || (name.starts_with(&versioned) && name.ends_with(".profile.json")) {
            candidates.push(path);
        }
    }
    candidates.sort();

    match candidates.len() {
        0 => Ok(None),
        1 => Ok(candidates.pop()),
        _ => Err(ResolveError::AmbiguousLocalProfile {
            name: id.identity(),
            dir,
            candidates,
        }),
    }
}

fn parse_profile_file<P: DocumentParser>(
    parser: &P,
    cache: &mut ParseCache<ProfileDocument>,
    id: &ProfileId,
    path: &Path,
) -> Result<Resolved<ProfileDocument>, ResolveError> {
    let source = read_source(path)?;
    let identity = CacheIdentity::profile(id);
    let parsed = if is_compiled(path) {
        cache.get_or_parse(&source, &identity, |s| CompiledJsonParser.parse_profile(s))?
    } else {
        cache.get_or_parse(&source, &identity, |s| parser.parse_profile(s))?
    };
    Ok(Resolved {
        document: parsed.document,
        provenance: Provenance::local(path),
        cache_warning: parsed.write_warning,
    })
}

fn parse_map_file<P: DocumentParser>(
    parser: &P,
    cache: &mut ParseCache<MapDocument>,
    id: &MapId,
    path: &Path,
) -> Result<Resolved<MapDocument>, ResolveError> {
    let source = read_source(path)?;
    let identity = CacheIdentity::map(id);
    let parsed = if is_compiled(path) {
        cache.get_or_parse(&source, &identity, |s| CompiledJsonParser.parse_map(s))?
    } else {
        cache.get_or_parse(&source, &identity, |s| parser.parse_map(s))?
    };
    Ok(Resolved {
        document: parsed.document,
        provenance: Provenance::local(path),
        cache_warning: parsed.write_warning,
    })
}

/// A `.json` file holds a compiled AST; anything else is DSL source for
/// the injected parser.
fn is_compiled(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

fn read_source(path: &Path) -> Result<String, ResolveError> {
    std::fs::read_to_string(path).map_err(|e| ResolveError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
