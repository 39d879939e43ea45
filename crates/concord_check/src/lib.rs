//! Pure consistency rules over resolved Concord documents.
//!
//! Three rule groups compare an already-resolved (profile, map, provider)
//! triple: profile/map header and usecase agreement, map/provider name
//! identity, and provider parameter coverage. All rules are synchronous,
//! perform no I/O, and collect discrepancies as issues rather than
//! failing; the only fatal path is an input that does not satisfy its
//! structural predicate, which must never be reported as "no issues".

#![warn(missing_docs)]

pub mod map_provider;
pub mod parameters;
pub mod profile_map;

pub use map_provider::check_map_provider;
pub use parameters::check_provider_parameters;
pub use profile_map::check_profile_map;

use std::collections::BTreeMap;

use concord_document::{DocumentError, MapDocument, ProfileDocument, ProviderDescriptor};
use concord_report::CheckResult;

/// Fatal checker errors.
///
/// Only structural-predicate failures are fatal; every actual
/// inconsistency between valid documents is a reported issue instead.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// A supplied document is not structurally valid.
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Runs the rule groups over one capability triple.
///
/// The groups are independent: a failed profile/map comparison never
/// short-circuits the map/provider or parameter checks, so the caller
/// receives the results in fixed order for valid inputs. The parameters
/// group only applies when there is something to cover: a provider with
/// no manifest entry and no declared parameters yields two results, not
/// a trivially clean third.
pub fn check_capability(
    profile: &ProfileDocument,
    map: &MapDocument,
    provider: &ProviderDescriptor,
    configured_parameters: Option<&BTreeMap<String, String>>,
    strict: bool,
) -> Result<Vec<CheckResult>, CheckError> {
    let mut results = vec![
        check_profile_map(profile, map, strict)?,
        check_map_provider(map, provider)?,
    ];
    if configured_parameters.is_some() || !provider.parameters.is_empty() {
        let empty = BTreeMap::new();
        results.push(check_provider_parameters(
            provider,
            configured_parameters.unwrap_or(&empty),
        )?);
    }
    Ok(results)
}

/// Renders a map header as a map id string for issue subjects.
pub(crate) fn map_subject(map: &MapDocument) -> String {
    let claim = &map.header.profile;
    let identity = match &claim.scope {
        Some(scope) => format!("{scope}/{}", claim.name),
        None => claim.name.clone(),
    };
    match &map.header.variant {
        Some(variant) => format!("{identity}.{}.{variant}", map.header.provider),
        None => format!("{identity}.{}", map.header.provider),
    }
}

/// Renders a profile header as a profile id string for issue subjects.
pub(crate) fn profile_subject(profile: &ProfileDocument) -> String {
    let header = &profile.header;
    match &header.scope {
        Some(scope) => format!("{scope}/{}@{}", header.name, header.version),
        None => format!("{}@{}", header.name, header.version),
    }
}
