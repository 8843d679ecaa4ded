//! Auto read-only
//!
//! Command-line host for the read-only policy.

use anyhow::Context;
use auto_readonly::{
    config::{AppConfig, LogFormat, ScopedSettings, load_config},
    editor::{ConsoleHost, Document, PolicyOptions, ReadOnlyPolicy, Session, run_session},
    patterns::GlobsetMatcher,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Auto read-only - mark documents read-only by glob pattern
#[derive(Parser, Debug)]
#[command(name = "auto-readonly")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "AUTO_READONLY_CONFIG")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, env = "AUTO_READONLY_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report whether each path would be made read-only
    Check {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Show every pattern matching a path and which one wins
    Explain { path: PathBuf },
    /// Apply the policy to focus changes read from stdin, one path per line
    Session {
        /// Document focused at startup
        #[arg(long)]
        active: Option<PathBuf>,
    },
}

type Policy = ReadOnlyPolicy<ScopedSettings, GlobsetMatcher>;

fn init_logging(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

fn document(path: &Path) -> anyhow::Result<Document> {
    let absolute = std::path::absolute(path)
        .with_context(|| format!("Failed to resolve path {}", path.display()))?;
    Ok(Document::new(absolute))
}

fn check(policy: &Policy, paths: &[PathBuf]) -> anyhow::Result<()> {
    for path in paths {
        let document = document(path)?;
        let decision = policy
            .evaluate(&document)
            .inspect_err(|e| error!(error = %e, "Invalid read-only configuration"))?;
        let label = if decision.is_read_only() {
            "read-only"
        } else {
            "writable"
        };
        println!("{}\t{}", label, document.path().display());
    }
    Ok(())
}

fn explain(policy: &Policy, path: &Path) -> anyhow::Result<()> {
    let document = document(path)?;
    let table = policy
        .patterns(&document)
        .inspect_err(|e| error!(error = %e, "Invalid read-only configuration"))?;
    let resolution = policy.resolver().explain(document.path(), &table);
    let winner = resolution.winner().map(|m| m.index);

    println!("{}", document.path().display());
    for (index, (pattern, value)) in table.iter().enumerate() {
        let marker = if Some(index) == winner {
            "=>"
        } else if resolution.matches().iter().any(|m| m.index == index) {
            " +"
        } else {
            "  "
        };
        println!("{} {} = {}", marker, pattern, value);
    }

    match resolution.value() {
        Some(true) => println!("read-only"),
        Some(false) => println!("writable"),
        None => println!("writable (no pattern matched)"),
    }
    Ok(())
}

async fn session(policy: Policy, active: Option<&Path>) -> anyhow::Result<()> {
    let active = active.map(document).transpose()?;
    let mut session = Session::new(ConsoleHost::stdout(), policy, active);
    let events = run_session(&mut session, BufReader::new(tokio::io::stdin())).await?;
    info!(events, "Session ended");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let config: AppConfig = load_config(args.config.as_deref())?;

    // Initialize logging
    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    init_logging(level, config.logging.format);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting auto-readonly"
    );

    let policy = ReadOnlyPolicy::new(
        ScopedSettings::from_config(&config),
        GlobsetMatcher::new(),
        PolicyOptions::from(&config.read_only),
    );

    match args.command {
        Command::Check { paths } => check(&policy, &paths),
        Command::Explain { path } => explain(&policy, &path),
        Command::Session { active } => session(policy, active.as_deref()).await,
    }
}
