//! Concord CLI — consistency checking for integration artifacts.
//!
//! Provides `concord check` for resolving a project's profiles, maps, and
//! providers and checking them against each other, and `concord lint` for
//! validating individual artifact files.

#![warn(missing_docs)]

mod check;
mod lint;
mod pipeline;
mod registry;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Default registry base URL when neither the flag nor the environment
/// variable is set.
const DEFAULT_REGISTRY: &str = "https://registry.concord.dev";

/// Environment variable overriding the registry base URL.
const REGISTRY_ENV: &str = "CONCORD_REGISTRY";

/// Concord — resolve and check integration artifacts.
#[derive(Parser, Debug)]
#[command(name = "concord", version, about = "Concord integration checker")]
pub struct Cli {
    /// Suppress warning output; warnings still count unless errors exist.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Registry base URL (overrides CONCORD_REGISTRY).
    #[arg(long, global = true)]
    pub registry: Option<String>,

    /// Cache directory (default: `<project>/.concord/cache`).
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check profiles against their maps and providers.
    Check(CheckArgs),
    /// Validate local artifact files.
    Lint(LintArgs),
}

/// Arguments for the `concord check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Profile to check (e.g. `starwars/character-information@1.0.3`).
    /// When omitted, every profile registered in `concord.toml` is checked.
    pub profile: Option<String>,

    /// Provider names to check against. Defaults to the providers
    /// registered for the profile in `concord.toml`.
    #[arg(short, long, num_args = 1..)]
    pub provider: Vec<String>,

    /// Map variant to select, when a provider has more than one map.
    #[arg(long)]
    pub variant: Option<String>,

    /// Treat missing usecase implementations as errors.
    #[arg(short, long)]
    pub strict: bool,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `concord lint` subcommand.
#[derive(Parser, Debug)]
pub struct LintArgs {
    /// Artifact files to validate.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// One line per issue.
    Short,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress warning output.
    pub quiet: bool,
    /// Registry base URL.
    pub registry: String,
    /// Optional cache directory override.
    pub cache_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let registry = cli
        .registry
        .or_else(|| std::env::var(REGISTRY_ENV).ok())
        .unwrap_or_else(|| DEFAULT_REGISTRY.to_string());
    let global = GlobalArgs {
        quiet: cli.quiet,
        registry,
        cache_dir: cli.cache_dir,
    };

    let result = match cli.command {
        Command::Check(ref args) => check::run(args, &global).await,
        Command::Lint(ref args) => lint::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
