//! redflag — AI-powered security review for git branch changes.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use redflag::analysis::{Analyzer, OpenAiAnalyzer};
use redflag::config::Config;
use redflag::constants;
use redflag::env::Env;
use redflag::git::{ChangeCollector, GitRepo};
use redflag::output;

use cli::args::{Cli, Command, ScanArgs};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan(args) => run_scan(args).await,
        Command::Version => run_version(),
    }
}

/// Print detailed version and build information.
fn run_version() -> Result<()> {
    println!(
        "{} {}",
        constants::APP_NAME.bold(),
        constants::VERSION.green().bold()
    );
    println!("{}  {}", "target:".dimmed(), constants::TARGET);
    Ok(())
}

async fn run_scan(args: ScanArgs) -> Result<()> {
    // Resolve repo root from --path (default: cwd)
    let base_dir = std::fs::canonicalize(&args.path)
        .with_context(|| format!("--path directory not found: {}", args.path.display()))?;
    let repo = GitRepo::discover(&base_dir)
        .await
        .context("not inside a git repository")?;

    // Load config with layering
    let mut config = Config::load(Some(repo.root()), &Env::real())
        .context("failed to load configuration")?;

    // CLI flags override config and environment
    if let Some(base) = args.base {
        config.scan.base_branch = base;
    }
    if let Some(model) = args.model {
        config.provider.model = model;
    }
    if let Some(temperature) = args.temperature {
        config.provider.temperature = temperature;
    }

    let progress = !args.no_progress;
    if progress {
        eprintln!(
            "  {} Collecting changes against '{}'…",
            "▸".cyan().bold(),
            config.scan.base_branch
        );
    }

    let collector = ChangeCollector::new(repo)
        .with_base_branch(config.scan.base_branch.clone())
        .with_extensions(config.scan.extensions.clone());
    let changes = collector
        .collect()
        .await
        .context("failed to collect changes")?;

    if changes.is_empty() {
        eprintln!("No source files have changed. Nothing to scan.");
        return Ok(());
    }

    if progress {
        for path in changes.paths() {
            eprintln!("    {} {}", "·".dimmed(), path.dimmed());
        }
        eprintln!(
            "  {} Analyzing {} file(s) with {}…",
            "▸".cyan().bold(),
            changes.len(),
            config.provider.model
        );
    }

    let analyzer =
        OpenAiAnalyzer::new(config.provider.clone()).map_err(|e| anyhow::anyhow!("{e}"))?;
    let analysis = analyzer.analyze(&changes).await.context("analysis failed")?;

    print!("{}", output::render_metrics(&analysis));
    print!("{}", output::render_report(&analysis));

    Ok(())
}
