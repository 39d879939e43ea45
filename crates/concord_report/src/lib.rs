//! Check issues, severity classification, and report rendering.
//!
//! The consistency checker produces [`CheckIssue`]s grouped into
//! [`CheckResult`]s; the session aggregates them (plus per-capability
//! failures) into a [`Report`] with error/warning totals. Renderers format
//! a report for the terminal (full or one-line-per-issue) or as JSON for
//! downstream tooling. Callers map totals to process exit codes.

#![warn(missing_docs)]

pub mod issue;
pub mod renderer;
pub mod report;
pub mod severity;

pub use issue::{CheckIssue, CheckKind, CheckResult};
pub use renderer::{HumanRenderer, JsonRenderer, ReportRenderer, ShortRenderer};
pub use report::{CapabilityReport, FileReport, Report, ReportEntry, Totals};
pub use severity::Severity;
