//! Report rendering backends for human-readable and machine-readable output.

use crate::issue::CheckResult;
use crate::report::{Report, ReportEntry};
use crate::severity::Severity;

/// Trait for rendering a batch report into an output string.
pub trait ReportRenderer {
    /// Renders the full report.
    fn render(&self, report: &Report) -> String;
}

/// Status glyph for the worst severity in a group.
fn glyph(worst: Option<Severity>) -> char {
    match worst {
        None => '✓',
        Some(Severity::Warning) => '⚠',
        Some(Severity::Error) => '✗',
    }
}

/// Renders reports as indented human-readable text.
///
/// Each capability gets a header with a status glyph and the provenance of
/// the three resolved artifacts, followed by one block per rule group.
/// With `quiet`, warning-severity issue lines are suppressed entirely;
/// they still count toward totals.
pub struct HumanRenderer {
    /// Whether to suppress warning-severity issue lines.
    pub quiet: bool,
}

impl HumanRenderer {
    /// Creates a renderer with the given quiet flag.
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    fn render_result(&self, result: &CheckResult, out: &mut String) {
        out.push_str(&format!(
            "  {} {}\n",
            glyph(result.worst_severity()),
            result.kind.label()
        ));
        for issue in &result.issues {
            if self.quiet && !issue.severity.is_error() {
                continue;
            }
            out.push_str(&format!("      {}: {}\n", issue.severity, issue.message));
        }
    }
}

impl ReportRenderer for HumanRenderer {
    fn render(&self, report: &Report) -> String {
        let mut out = String::new();
        for entry in &report.reports {
            match entry {
                ReportEntry::Checked(c) => {
                    let worst = c.results.iter().filter_map(CheckResult::worst_severity).max();
                    let mut header = format!("{} {} for {}", glyph(worst), c.profile, c.provider);
                    if let Some(variant) = &c.variant {
                        header.push_str(&format!(" (variant {variant})"));
                    }
                    out.push_str(&header);
                    out.push('\n');
                    out.push_str(&format!("    profile: {}\n", c.profile_provenance));
                    out.push_str(&format!("    map: {}\n", c.map_provenance));
                    out.push_str(&format!("    provider: {}\n", c.provider_provenance));
                    for result in &c.results {
                        self.render_result(result, &mut out);
                    }
                }
                ReportEntry::Linted(f) => {
                    let worst = f.issues.iter().map(|i| i.severity).max();
                    out.push_str(&format!("{} {}\n", glyph(worst), f.path.display()));
                    for issue in &f.issues {
                        if self.quiet && !issue.severity.is_error() {
                            continue;
                        }
                        out.push_str(&format!("      {}: {}\n", issue.severity, issue.message));
                    }
                }
                ReportEntry::Failed { subject, error } => {
                    out.push_str(&format!("✗ could not check {subject}: {error}\n"));
                }
            }
        }
        out
    }
}

/// Renders one line per issue, for grep-friendly output.
pub struct ShortRenderer {
    /// Whether to suppress warning-severity lines.
    pub quiet: bool,
}

impl ShortRenderer {
    /// Creates a renderer with the given quiet flag.
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl ReportRenderer for ShortRenderer {
    fn render(&self, report: &Report) -> String {
        let mut out = String::new();
        for entry in &report.reports {
            match entry {
                ReportEntry::Checked(c) => {
                    for result in &c.results {
                        for issue in &result.issues {
                            if self.quiet && !issue.severity.is_error() {
                                continue;
                            }
                            out.push_str(&format!(
                                "{} {} {}: {}\n",
                                issue.severity,
                                result.kind.label(),
                                result.kind.subjects(),
                                issue.message
                            ));
                        }
                    }
                }
                ReportEntry::Linted(f) => {
                    for issue in &f.issues {
                        if self.quiet && !issue.severity.is_error() {
                            continue;
                        }
                        out.push_str(&format!(
                            "{} lint {}: {}\n",
                            issue.severity,
                            f.path.display(),
                            issue.message
                        ));
                    }
                }
                ReportEntry::Failed { subject, error } => {
                    out.push_str(&format!("error check {subject}: {error}\n"));
                }
            }
        }
        out
    }
}

/// Renders the report structure verbatim as JSON.
///
/// Downstream tooling consumes issue kind, severity, message, and
/// provenance without re-parsing human text; the output round-trips
/// through serde back into an identical [`Report`].
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, report: &Report) -> String {
        // Serialization of this tree cannot fail: no maps with non-string
        // keys, no non-finite floats.
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }
}
