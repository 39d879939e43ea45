//! Checking sessions: batch orchestration over capabilities and files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use concord_cache::ParseCache;
use concord_check::check_capability;
use concord_common::{MapId, MapVersion, ProfileId};
use concord_document::{
    CompiledJsonParser, DocumentError, DocumentParser, MapDocument, ProfileDocument,
    ProviderDescriptor,
};
use concord_manifest::Manifest;
use concord_report::{CapabilityReport, CheckIssue, FileReport, Report, ReportEntry};

use crate::error::ResolveError;
use crate::registry::Registry;
use crate::resolver::{self, Resolved};

/// One capability to check: a profile and the provider to check it
/// against, with an optional map variant.
#[derive(Clone, Debug)]
pub struct CapabilityRequest {
    /// The profile, optionally versioned.
    pub profile: ProfileId,
    /// The provider name.
    pub provider: String,
    /// The map variant, when more than one map exists for the provider.
    pub variant: Option<String>,
}

impl CapabilityRequest {
    /// Creates a request without a variant.
    pub fn new(profile: ProfileId, provider: impl Into<String>) -> Self {
        Self {
            profile,
            provider: provider.into(),
            variant: None,
        }
    }

    /// Human-readable subject line used in failed entries.
    fn subject(&self) -> String {
        match &self.variant {
            Some(variant) => format!("{} for {} ({variant})", self.profile, self.provider),
            None => format!("{} for {}", self.profile, self.provider),
        }
    }
}

/// A checking session over one project.
///
/// Owns the manifest, the registry client, the DSL parser, and one parse
/// cache per document type. Batch entries run in input order and a fatal
/// error in one capability becomes a failed report entry without
/// disturbing its siblings; within a capability, the map and the provider
/// descriptor resolve concurrently.
pub struct Session<R, P> {
    manifest: Manifest,
    registry: R,
    parser: P,
    profiles: ParseCache<ProfileDocument>,
    maps: ParseCache<MapDocument>,
    strict: bool,
    /// Descriptors already resolved this session, by provider name.
    seen_providers: HashMap<String, ProviderDescriptor>,
    cache_warnings: Vec<String>,
}

impl<R: Registry, P: DocumentParser> Session<R, P> {
    /// Creates a session with caches rooted at `cache_dir`.
    pub fn new(
        manifest: Manifest,
        registry: R,
        parser: P,
        cache_dir: impl Into<PathBuf>,
        strict: bool,
    ) -> Self {
        let cache_dir = cache_dir.into();
        Self {
            manifest,
            registry,
            parser,
            profiles: ParseCache::new(&cache_dir),
            maps: ParseCache::new(cache_dir),
            strict,
            seen_providers: HashMap::new(),
            cache_warnings: Vec::new(),
        }
    }

    /// Checks a batch of capabilities, producing one report entry each,
    /// in input order.
    pub async fn check(&mut self, requests: &[CapabilityRequest]) -> Report {
        let mut entries = Vec::with_capacity(requests.len());
        for request in requests {
            let entry = match self.check_one(request).await {
                Ok(entry) => entry,
                Err(e) => ReportEntry::Failed {
                    subject: request.subject(),
                    error: e.to_string(),
                },
            };
            entries.push(entry);
        }
        Report::new(entries)
    }

    async fn check_one(&mut self, request: &CapabilityRequest) -> Result<ReportEntry, ResolveError> {
        let profile = resolver::resolve_profile(
            &self.manifest,
            &self.registry,
            &self.parser,
            &mut self.profiles,
            &request.profile,
        )
        .await?;
        self.note_cache_warning(&profile.cache_warning);

        let map_id = MapId {
            profile: request.profile.clone(),
            provider: request.provider.clone(),
            version: MapVersion {
                major: profile.document.header.version.major,
                minor: profile.document.header.version.minor,
            },
            variant: request.variant.clone(),
        };
        let (map, provider) = tokio::join!(
            resolver::resolve_map(
                &self.manifest,
                &self.registry,
                &self.parser,
                &mut self.maps,
                &map_id,
            ),
            resolver::resolve_provider(&self.manifest, &self.registry, &request.provider),
        );
        let (map, provider) = (map?, provider?);
        self.note_cache_warning(&map.cache_warning);
        self.claim_provider_name(&provider)?;

        // The parameters group only runs when the manifest configures the
        // provider or the descriptor declares parameters.
        let configured = self
            .manifest
            .provider_entry(&request.provider)
            .map(|e| e.parameters.clone());
        let results = check_capability(
            &profile.document,
            &map.document,
            &provider.document,
            configured.as_ref(),
            self.strict,
        )?;

        Ok(ReportEntry::Checked(CapabilityReport {
            profile: request.profile.to_string(),
            provider: request.provider.clone(),
            variant: request.variant.clone(),
            profile_provenance: profile.provenance,
            map_provenance: map.provenance,
            provider_provenance: provider.provenance,
            results,
        }))
    }

    /// Lints local artifact files, one report entry per file, in input
    /// order. Files are classified by name suffix.
    pub fn lint_files(&mut self, paths: &[PathBuf]) -> Report {
        let entries = paths.iter().map(|path| self.lint_one(path)).collect();
        Report::new(entries)
    }

    fn lint_one(&mut self, path: &Path) -> ReportEntry {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                return ReportEntry::Failed {
                    subject: path.display().to_string(),
                    error: format!("failed to read: {e}"),
                }
            }
        };

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let parsed: Result<(), DocumentError> = if name.ends_with(".provider.json") {
            ProviderDescriptor::from_json(&source).map(|_| ())
        } else if name.ends_with(".profile.json") {
            CompiledJsonParser.parse_profile(&source).map(|_| ())
        } else if name.ends_with(".map.json") {
            CompiledJsonParser.parse_map(&source).map(|_| ())
        } else if name.ends_with(".profile") {
            self.parser.parse_profile(&source).map(|_| ())
        } else if name.ends_with(".map") {
            self.parser.parse_map(&source).map(|_| ())
        } else {
            return ReportEntry::Linted(FileReport {
                path: path.to_path_buf(),
                issues: vec![CheckIssue::error(format!(
                    "unrecognized artifact file name '{name}'"
                ))],
            });
        };

        let issues = match parsed {
            Ok(()) => Vec::new(),
            Err(e) => vec![CheckIssue::error(e.to_string())],
        };
        ReportEntry::Linted(FileReport {
            path: path.to_path_buf(),
            issues,
        })
    }

    /// Rejects a provider name that already resolved to a different
    /// descriptor earlier in this session.
    fn claim_provider_name(
        &mut self,
        provider: &Resolved<ProviderDescriptor>,
    ) -> Result<(), ResolveError> {
        match self.seen_providers.get(&provider.document.name) {
            Some(previous) if *previous != provider.document => {
                Err(ResolveError::DuplicateProvider {
                    name: provider.document.name.clone(),
                })
            }
            Some(_) => Ok(()),
            None => {
                self.seen_providers
                    .insert(provider.document.name.clone(), provider.document.clone());
                Ok(())
            }
        }
    }

    fn note_cache_warning(&mut self, warning: &Option<String>) {
        if let Some(warning) = warning {
            self.cache_warnings.push(warning.clone());
        }
    }

    /// Drains cache write warnings collected so far, for the caller to
    /// surface outside the report.
    pub fn take_cache_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.cache_warnings)
    }
}
