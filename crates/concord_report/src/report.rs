//! Report aggregation: entries, totals, and batch results.

use concord_common::Provenance;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::issue::{CheckIssue, CheckResult};

/// The outcome of checking one capability: a (profile, map, provider)
/// triple with the provenance of each resolved artifact.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CapabilityReport {
    /// Profile id string.
    pub profile: String,
    /// Provider name.
    pub provider: String,
    /// Map variant, when one was selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    /// Where the profile came from.
    pub profile_provenance: Provenance,
    /// Where the map came from.
    pub map_provenance: Provenance,
    /// Where the provider descriptor came from.
    pub provider_provenance: Provenance,
    /// The check results, one per rule group, in fixed rule order.
    pub results: Vec<CheckResult>,
}

/// The outcome of linting one local artifact file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    /// The linted file.
    pub path: PathBuf,
    /// Issues found; empty means the file is a valid artifact.
    pub issues: Vec<CheckIssue>,
}

/// One entry in a batch report.
///
/// A capability whose resolution or parsing failed fatally becomes a
/// `Failed` entry; it never aborts sibling entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entry", rename_all = "snake_case")]
pub enum ReportEntry {
    /// A capability that was fully checked.
    Checked(CapabilityReport),
    /// A local file that was linted.
    Linted(FileReport),
    /// A capability or file that could not be checked at all.
    Failed {
        /// What was being checked (profile/provider pair or file path).
        subject: String,
        /// The fatal diagnostic, naming the attempted locations.
        error: String,
    },
}

impl ReportEntry {
    /// Errors contributed by this entry. A fatal failure counts as one.
    pub fn error_count(&self) -> usize {
        match self {
            ReportEntry::Checked(c) => c.results.iter().map(CheckResult::error_count).sum(),
            ReportEntry::Linted(f) => {
                f.issues.iter().filter(|i| i.severity.is_error()).count()
            }
            ReportEntry::Failed { .. } => 1,
        }
    }

    /// Warnings contributed by this entry.
    pub fn warning_count(&self) -> usize {
        match self {
            ReportEntry::Checked(c) => c.results.iter().map(CheckResult::warning_count).sum(),
            ReportEntry::Linted(f) => {
                f.issues.iter().filter(|i| !i.severity.is_error()).count()
            }
            ReportEntry::Failed { .. } => 0,
        }
    }
}

/// Aggregated totals over a whole batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Total error-severity issues (fatal failures included).
    pub errors: usize,
    /// Total warning-severity issues.
    pub warnings: usize,
}

/// A complete batch report: entries in input order plus totals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Entries, in the order the capabilities/files were supplied.
    pub reports: Vec<ReportEntry>,
    /// Aggregated totals.
    pub total: Totals,
}

impl Report {
    /// Builds a report from entries, computing totals.
    pub fn new(reports: Vec<ReportEntry>) -> Self {
        let total = Totals {
            errors: reports.iter().map(ReportEntry::error_count).sum(),
            warnings: reports.iter().map(ReportEntry::warning_count).sum(),
        };
        Self { reports, total }
    }

    /// The process exit code for this report.
    ///
    /// Any error maps to 1; warnings only map to 2 unless `quiet`; an
    /// issue-free report maps to 0. CI callers rely on this contract.
    pub fn exit_code(&self, quiet: bool) -> i32 {
        if self.total.errors > 0 {
            1
        } else if self.total.warnings > 0 && !quiet {
            2
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::CheckKind;

    fn checked_entry(errors: usize, warnings: usize) -> ReportEntry {
        let mut result = CheckResult::new(CheckKind::Parameters {
            provider: "swapi".to_string(),
        });
        for _ in 0..errors {
            result.issues.push(CheckIssue::error("e"));
        }
        for _ in 0..warnings {
            result.issues.push(CheckIssue::warning("w"));
        }
        ReportEntry::Checked(CapabilityReport {
            profile: "starwars/character-information".to_string(),
            provider: "swapi".to_string(),
            variant: None,
            profile_provenance: Provenance::remote("1.0.3"),
            map_provenance: Provenance::remote("1.0"),
            provider_provenance: Provenance::remote("1"),
            results: vec![result],
        })
    }

    #[test]
    fn totals_sum_across_entries() {
        let report = Report::new(vec![checked_entry(1, 2), checked_entry(0, 1)]);
        assert_eq!(report.total, Totals { errors: 1, warnings: 3 });
    }

    #[test]
    fn failed_entry_counts_one_error() {
        let report = Report::new(vec![ReportEntry::Failed {
            subject: "starwars/character-information for swapi".to_string(),
            error: "profile not found".to_string(),
        }]);
        assert_eq!(report.total.errors, 1);
        assert_eq!(report.total.warnings, 0);
    }

    #[test]
    fn exit_codes() {
        assert_eq!(Report::new(vec![checked_entry(1, 0)]).exit_code(false), 1);
        assert_eq!(Report::new(vec![checked_entry(0, 1)]).exit_code(false), 2);
        // Quiet demotes warnings-only to success, but never hides errors.
        assert_eq!(Report::new(vec![checked_entry(0, 1)]).exit_code(true), 0);
        assert_eq!(Report::new(vec![checked_entry(1, 1)]).exit_code(true), 1);
        assert_eq!(Report::new(vec![checked_entry(0, 0)]).exit_code(false), 0);
    }

    #[test]
    fn serde_roundtrip() {
        let report = Report::new(vec![
            checked_entry(1, 1),
            ReportEntry::Linted(FileReport {
                path: PathBuf::from("profiles/a.profile.json"),
                issues: vec![],
            }),
        ]);
        let json = serde_json::to_string(&report).unwrap();
        let back: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
    }
}
