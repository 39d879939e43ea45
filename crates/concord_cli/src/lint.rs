//! `concord lint` — validate local artifact files.

use concord_document::CompiledJsonParser;
use concord_manifest::{Manifest, ProjectManifest};
use concord_resolve::Session;

use crate::pipeline::{cache_dir, find_project_root, render_report};
use crate::registry::HttpRegistry;
use crate::{GlobalArgs, LintArgs, ReportFormat};

/// Runs the `concord lint` command.
///
/// Lint never talks to the registry; files are classified by name and
/// parsed in place. Works outside a project directory too.
pub fn run(args: &LintArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let (manifest, root) = match find_project_root(&cwd) {
        Ok(root) => (concord_manifest::load_manifest(&root)?, root),
        Err(_) => (Manifest::new(ProjectManifest::default(), &cwd), cwd),
    };

    let registry = HttpRegistry::new(global.registry.clone());
    let mut session = Session::new(
        manifest,
        registry,
        CompiledJsonParser,
        cache_dir(global, &root),
        false,
    );

    let report = session.lint_files(&args.files);
    render_report(&report, args.format, global.quiet);
    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!(
            "   Result: {} error(s), {} warning(s)",
            report.total.errors, report.total.warnings
        );
    }

    Ok(report.exit_code(global.quiet))
}
