//! jqfilter CLI: apply jq filters to JSON documents.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod runner;

#[derive(Debug, Parser)]
#[command(name = "jqfilter")]
#[command(about = "Apply jq filters to JSON documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Log session lifecycle events to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a filter against a JSON document
    Run(RunCommand),
    /// Check that a filter compiles, without running it
    Validate(ValidateCommand),
}

/// Run a filter against a JSON document
#[derive(Debug, Args)]
pub struct RunCommand {
    /// jq filter expression, e.g. '.users[] | .name'
    pub filter: String,

    /// Input file (defaults to stdin)
    pub file: Option<PathBuf>,

    /// Output string results without JSON quotes
    #[arg(short, long)]
    pub raw_output: bool,

    /// Single-line output (the default)
    #[arg(short, long, conflicts_with = "pretty")]
    pub compact_output: bool,

    /// Indented, multi-line output
    #[arg(short, long)]
    pub pretty: bool,

    /// Sort object keys (also enabled by JQFILTER_SORT_KEYS=1)
    #[arg(short = 'S', long)]
    pub sort_keys: bool,

    /// Print every result instead of only the first
    #[arg(short, long)]
    pub all: bool,
}

/// Check that a filter compiles, without running it
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// jq filter expression
    pub filter: String,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "jqfilter=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = match cli.command {
        Command::Run(args) => runner::run(args)?,
        Command::Validate(args) => runner::validate(args),
    };
    std::process::exit(code);
}
