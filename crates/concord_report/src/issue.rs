//! Check issues and result groups.

use serde::{Deserialize, Serialize};

use crate::severity::Severity;

/// A single discrepancy found by one check rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIssue {
    /// How severe the discrepancy is.
    pub severity: Severity,
    /// Full-context description: which documents, which rule, which values.
    pub message: String,
}

impl CheckIssue {
    /// Creates an error-severity issue.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Creates a warning-severity issue.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// Creates an issue whose severity depends on strict mode.
    pub fn strict_dependent(strict: bool, message: impl Into<String>) -> Self {
        if strict {
            Self::error(message)
        } else {
            Self::warning(message)
        }
    }
}

/// Which pair of documents a check result compares, with subject ids.
///
/// A closed sum so the renderers match exhaustively: adding a check kind
/// is a compile-time-checked change everywhere a report is formatted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckKind {
    /// Profile header and usecase set against a map.
    ProfileMap {
        /// Profile id string.
        profile: String,
        /// Map id string.
        map: String,
    },
    /// Map's declared provider against the descriptor.
    MapProvider {
        /// Map id string.
        map: String,
        /// Provider name.
        provider: String,
    },
    /// Provider integration parameters against the manifest.
    Parameters {
        /// Provider name.
        provider: String,
    },
}

impl CheckKind {
    /// Short human label for the rule group.
    pub fn label(&self) -> &'static str {
        match self {
            CheckKind::ProfileMap { .. } => "profile/map",
            CheckKind::MapProvider { .. } => "map/provider",
            CheckKind::Parameters { .. } => "parameters",
        }
    }

    /// The subjects the group compared, for rendering.
    pub fn subjects(&self) -> String {
        match self {
            CheckKind::ProfileMap { profile, map } => format!("{profile} against {map}"),
            CheckKind::MapProvider { map, provider } => format!("{map} against {provider}"),
            CheckKind::Parameters { provider } => provider.clone(),
        }
    }
}

/// All issues one check rule group produced for one capability.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// The rule group and its subjects.
    #[serde(flatten)]
    pub kind: CheckKind,
    /// Issues found; empty means the documents are consistent.
    pub issues: Vec<CheckIssue>,
}

impl CheckResult {
    /// Creates a result for the given kind with no issues yet.
    pub fn new(kind: CheckKind) -> Self {
        Self {
            kind,
            issues: Vec::new(),
        }
    }

    /// The worst severity present, or `None` when the group is clean.
    pub fn worst_severity(&self) -> Option<Severity> {
        self.issues.iter().map(|i| i.severity).max()
    }

    /// Number of error-severity issues.
    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|i| i.severity.is_error()).count()
    }

    /// Number of warning-severity issues.
    pub fn warning_count(&self) -> usize {
        self.issues.iter().filter(|i| !i.severity.is_error()).count()
    }
}
