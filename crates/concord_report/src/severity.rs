//! Issue severity levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The severity of a check issue.
///
/// Ordered from least to most severe, matching the derived
/// `PartialOrd`/`Ord` based on declaration order. Strict mode promotes
/// certain rules from `Warning` to `Error` at issue-creation time; there
/// is no later reclassification.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A discrepancy that is tolerable during development.
    Warning,
    /// A definite inconsistency between artifacts.
    Error,
}

impl Severity {
    /// Returns `true` for [`Error`](Severity::Error).
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering() {
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn is_error() {
        assert!(Severity::Error.is_error());
        assert!(!Severity::Warning.is_error());
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Severity::Error), "error");
        assert_eq!(format!("{}", Severity::Warning), "warning");
    }

    #[test]
    fn serde_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Error).unwrap(), "\"error\"");
    }
}
