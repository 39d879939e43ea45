//! Map/provider identity: the one rule that is never relaxed.

use concord_document::{Document, MapDocument, ProviderDescriptor};
use concord_report::{CheckIssue, CheckKind, CheckResult};

use crate::{map_subject, CheckError};

/// Checks that a map's declared provider equals the descriptor's name.
///
/// Provider identity is never allowed to drift: the mismatch is an
/// `Error` in both strict and lenient modes, and the message names both
/// strings so the author can see which side is stale.
pub fn check_map_provider(
    map: &MapDocument,
    provider: &ProviderDescriptor,
) -> Result<CheckResult, CheckError> {
    map.validate()?;
    provider.validate()?;

    let mut result = CheckResult::new(CheckKind::MapProvider {
        map: map_subject(map),
        provider: provider.name.clone(),
    });

    if map.header.provider != provider.name {
        result.issues.push(CheckIssue::error(format!(
            "map targets provider '{}' but the descriptor is named '{}'",
            map.header.provider, provider.name
        )));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{map, provider};
    use concord_report::Severity;

    #[test]
    fn matching_names_are_clean() {
        let result =
            check_map_provider(&map("swapi", &["A"]), &provider("swapi")).unwrap();
        assert!(result.issues.is_empty());
    }

    #[test]
    fn mismatch_is_one_error_naming_both() {
        let result =
            check_map_provider(&map("swapi", &["A"]), &provider("other-swapi")).unwrap();
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].severity, Severity::Error);
        assert!(result.issues[0].message.contains("'swapi'"));
        assert!(result.issues[0].message.contains("'other-swapi'"));
    }

    #[test]
    fn invalid_provider_is_fatal() {
        let mut bad = provider("swapi");
        bad.default_service = "missing".to_string();
        assert!(check_map_provider(&map("swapi", &["A"]), &bad).is_err());
    }
}
