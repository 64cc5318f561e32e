//! Clap argument types for the redflag CLI.

use clap::Parser;
use std::path::PathBuf;

/// AI-powered security review for git branch changes.
#[derive(Parser, Debug)]
#[command(name = "redflag", version = redflag::constants::VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Scan branch changes for security vulnerabilities.
    Scan(ScanArgs),

    /// Print version and build information.
    Version,
}

/// Arguments for the `scan` subcommand.
#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Path to the repository or working directory (default: current directory).
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Base branch the current branch is compared against.
    #[arg(long)]
    pub base: Option<String>,

    /// Model used for the analysis.
    #[arg(long)]
    pub model: Option<String>,

    /// Sampling temperature for the completion request.
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Suppress progress output on stderr.
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}
