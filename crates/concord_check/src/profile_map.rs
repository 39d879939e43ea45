//! Profile/map agreement: header identity and usecase coverage.

use concord_document::{Document, MapDocument, ProfileDocument};
use concord_report::{CheckIssue, CheckKind, CheckResult};

use crate::{map_subject, profile_subject, CheckError};

/// Compares a profile against a map that claims to implement it.
///
/// Header checks are independent: scope, name, major, and minor each
/// contribute exactly one `Error` on mismatch, so a fully misdirected map
/// produces up to four issues. Patch and label are never compared — a map
/// written against `1.0.3` is still conformant with profile `1.0.7`.
/// Every profile usecase missing from the map's operations contributes
/// one issue: `Error` under strict mode (publish gating), `Warning`
/// otherwise (a map lagging behind new usecases is tolerable during
/// development). Extra operations in the map are not an issue.
pub fn check_profile_map(
    profile: &ProfileDocument,
    map: &MapDocument,
    strict: bool,
) -> Result<CheckResult, CheckError> {
    profile.validate()?;
    map.validate()?;

    let mut result = CheckResult::new(CheckKind::ProfileMap {
        profile: profile_subject(profile),
        map: map_subject(map),
    });

    let header = &profile.header;
    let claim = &map.header.profile;

    if header.scope != claim.scope {
        result.issues.push(CheckIssue::error(format!(
            "map claims profile scope '{}' but the profile declares '{}'",
            display_scope(&claim.scope),
            display_scope(&header.scope),
        )));
    }
    if header.name != claim.name {
        result.issues.push(CheckIssue::error(format!(
            "map claims profile name '{}' but the profile declares '{}'",
            claim.name, header.name
        )));
    }
    if header.version.major != claim.version.major {
        result.issues.push(CheckIssue::error(format!(
            "map was written against major version {} but the profile is at {}",
            claim.version.major, header.version.major
        )));
    }
    if header.version.minor != claim.version.minor {
        result.issues.push(CheckIssue::error(format!(
            "map was written against minor version {}.{} but the profile is at {}.{}",
            claim.version.major,
            claim.version.minor,
            header.version.major,
            header.version.minor
        )));
    }

    let operations = map.operation_names();
    for usecase in profile.usecase_names() {
        if !operations.contains(&usecase) {
            result.issues.push(CheckIssue::strict_dependent(
                strict,
                format!("map does not implement usecase '{usecase}'"),
            ));
        }
    }

    Ok(result)
}

fn display_scope(scope: &Option<String>) -> &str {
    scope.as_deref().unwrap_or("(none)")
}
