//! Shared helpers for CLI commands: project root discovery, request
//! building, and report rendering.

use std::path::{Path, PathBuf};

use concord_common::ProfileId;
use concord_manifest::{Manifest, MANIFEST_FILE};
use concord_report::{HumanRenderer, JsonRenderer, Report, ReportRenderer, ShortRenderer};
use concord_resolve::CapabilityRequest;

use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// Walks up from `start` looking for the nearest directory containing
/// `concord.toml`.
pub fn find_project_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(MANIFEST_FILE).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find {MANIFEST_FILE} in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// The cache directory for a project, honoring the global override.
pub fn cache_dir(global: &GlobalArgs, project_root: &Path) -> PathBuf {
    global
        .cache_dir
        .clone()
        .unwrap_or_else(|| project_root.join(".concord/cache"))
}

/// Builds the capability requests for a `check` invocation.
///
/// With an explicit profile, the providers come from the command line or,
/// when none are given, from the profile's manifest registration. Without
/// one, every registered profile is checked against every provider it has
/// a map registered for, in manifest order.
pub fn build_requests(
    manifest: &Manifest,
    args: &CheckArgs,
) -> Result<Vec<CapabilityRequest>, Box<dyn std::error::Error>> {
    let mut requests = Vec::new();

    if let Some(profile) = &args.profile {
        let id: ProfileId = profile.parse()?;
        let providers = if args.provider.is_empty() {
            registered_providers(manifest, &id).ok_or_else(|| {
                format!(
                    "profile {} has no providers in {MANIFEST_FILE}; pass --provider",
                    id.identity()
                )
            })?
        } else {
            args.provider.clone()
        };
        for provider in providers {
            requests.push(CapabilityRequest {
                profile: id.clone(),
                provider,
                variant: args.variant.clone(),
            });
        }
    } else {
        for (key, entry) in &manifest.project.profiles {
            let id: ProfileId = key.parse()?;
            for provider in entry.providers.keys() {
                requests.push(CapabilityRequest {
                    profile: id.clone(),
                    provider: provider.clone(),
                    variant: args.variant.clone(),
                });
            }
        }
    }

    Ok(requests)
}

fn registered_providers(manifest: &Manifest, id: &ProfileId) -> Option<Vec<String>> {
    let entry = manifest.profile_entry(id)?;
    if entry.providers.is_empty() {
        return None;
    }
    Some(entry.providers.keys().cloned().collect())
}

/// Renders a report to stdout in the requested format.
pub fn render_report(report: &Report, format: ReportFormat, quiet: bool) {
    let rendered = match format {
        ReportFormat::Text => HumanRenderer::new(quiet).render(report),
        ReportFormat::Short => ShortRenderer::new(quiet).render(report),
        ReportFormat::Json => JsonRenderer.render(report),
    };
    print!("{rendered}");
    if !rendered.ends_with('\n') {
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_manifest::load_manifest_from_str;

    fn manifest() -> Manifest {
        let project = load_manifest_from_str(
            r#"
[profiles."starwars/character-information"]
version = "1.0.3"

[profiles."starwars/character-information".providers.swapi]

[profiles."starwars/planet-information"]
version = "2.0.0"

[profiles."starwars/planet-information".providers.swapi]
[profiles."starwars/planet-information".providers.other]
"#,
        )
        .unwrap();
        Manifest::new(project, "/project")
    }

    fn args(profile: Option<&str>, providers: &[&str]) -> CheckArgs {
        CheckArgs {
            profile: profile.map(str::to_string),
            provider: providers.iter().map(|p| p.to_string()).collect(),
            variant: None,
            strict: false,
            format: ReportFormat::Text,
        }
    }

    #[test]
    fn explicit_profile_and_providers() {
        let requests = build_requests(
            &manifest(),
            &args(Some("starwars/character-information@1.0.3"), &["swapi", "other"]),
        )
        .unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].provider, "swapi");
        assert_eq!(requests[1].provider, "other");
        assert!(requests[0].profile.version.is_some());
    }

    #[test]
    fn providers_default_to_manifest_registrations() {
        let requests = build_requests(
            &manifest(),
            &args(Some("starwars/character-information"), &[]),
        )
        .unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].provider, "swapi");
    }

    #[test]
    fn unregistered_profile_without_providers_errors() {
        let err = build_requests(&manifest(), &args(Some("starwars/unknown"), &[])).unwrap_err();
        assert!(err.to_string().contains("pass --provider"));
    }

    #[test]
    fn no_profile_checks_everything_in_manifest_order() {
        let requests = build_requests(&manifest(), &args(None, &[])).unwrap();
        let pairs: Vec<_> = requests
            .iter()
            .map(|r| format!("{}:{}", r.profile.identity(), r.provider))
            .collect();
        assert_eq!(
            pairs,
            [
                "starwars/character-information:swapi",
                "starwars/planet-information:other",
                "starwars/planet-information:swapi",
            ]
        );
    }

    #[test]
    fn find_project_root_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "").unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        let root = find_project_root(&nested).unwrap();
        assert_eq!(root, dir.path());
    }
}
