//! `concord check` — resolve and check capabilities.
//!
//! The pipeline:
//!
//! 1. Find the project root (walk up looking for `concord.toml`)
//! 2. Load and validate the manifest
//! 3. Build the capability requests (explicit profile or whole manifest)
//! 4. Run the checking session against local files and the registry
//! 5. Render the report and map totals to an exit code

use concord_document::CompiledJsonParser;
use concord_resolve::Session;

use crate::pipeline::{build_requests, cache_dir, find_project_root, render_report};
use crate::registry::HttpRegistry;
use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// Runs the `concord check` command.
///
/// Returns exit code 0 when clean, 1 on any error, 2 on warnings only
/// (0 with `--quiet`).
pub async fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let project_root = find_project_root(&cwd)?;
    let manifest = concord_manifest::load_manifest(&project_root)?;

    let requests = build_requests(&manifest, args)?;
    if requests.is_empty() {
        if !global.quiet {
            eprintln!("warning: nothing to check; no profiles registered in concord.toml");
        }
        return Ok(0);
    }

    if !global.quiet {
        eprintln!("   Checking {} capabilit{}", requests.len(), plural_y(requests.len()));
    }

    let cache = cache_dir(global, &project_root);
    let registry = HttpRegistry::new(global.registry.clone());
    let mut session = Session::new(manifest, registry, CompiledJsonParser, cache, args.strict);

    let report = session.check(&requests).await;
    if !global.quiet {
        for warning in session.take_cache_warnings() {
            eprintln!("warning: {warning}");
        }
    }

    render_report(&report, args.format, global.quiet);
    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!(
            "   Result: {} error(s), {} warning(s)",
            report.total.errors, report.total.warnings
        );
    }

    Ok(report.exit_code(global.quiet))
}

fn plural_y(count: usize) -> &'static str {
    if count == 1 {
        "y"
    } else {
        "ies"
    }
}
