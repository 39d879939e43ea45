//! Provider parameter coverage against the project manifest.

use std::collections::BTreeMap;

use concord_document::ProviderDescriptor;
use concord_report::{CheckIssue, CheckKind, CheckResult};

use crate::CheckError;

/// Checks that each provider parameter is satisfiable.
///
/// A parameter is satisfied by a configured value in the manifest or by a
/// default declared in the descriptor. Everything else is a `Warning`,
/// not an `Error`: the capability may still function against services
/// that ignore the parameter.
pub fn check_provider_parameters(
    provider: &ProviderDescriptor,
    configured: &BTreeMap<String, String>,
) -> Result<CheckResult, CheckError> {
    provider.validate()?;

    let mut result = CheckResult::new(CheckKind::Parameters {
        provider: provider.name.clone(),
    });

    for parameter in &provider.parameters {
        if configured.contains_key(&parameter.name) || parameter.default.is_some() {
            continue;
        }
        result.issues.push(CheckIssue::warning(format!(
            "parameter '{}' of provider '{}' has no configured value and no default",
            parameter.name, provider.name
        )));
    }

    Ok(result)
}
