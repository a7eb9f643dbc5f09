//! # grt-cli
//!
//! Command-line interface for the Goal Reflection Tracker.
//!
//! - `grt` / `grt tui`: interactive goal editor in the terminal
//! - `grt principles`: print the principle catalog
//! - `grt suggest <principle>`: print suggestions for one principle

mod commands;
mod logging;
mod tui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use grt_tracker::TrackerConfig;

/// Goal Reflection Tracker: pick a RICH principle and set a goal.
#[derive(Parser)]
#[command(name = "grt", version, about)]
struct Cli {
    /// Project root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Config file (defaults to <project-root>/.grt/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file (overrides the config).
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive goal editor (default).
    Tui,
    /// List the principles.
    Principles {
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Fetch suggestions for one principle.
    Suggest {
        /// Principle id (e.g., "responsibility").
        principle: String,
        /// Skip the simulated latency.
        #[arg(long)]
        no_delay: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let project_root = cli.project_root.canonicalize().unwrap_or(cli.project_root);
    let config_path = cli
        .config
        .unwrap_or_else(|| TrackerConfig::path_for_project(&project_root));
    let mut config = TrackerConfig::load_or_default(&config_path);
    if let Some(log_file) = cli.log_file {
        config.log.file = Some(log_file);
    }

    let command = cli.command.unwrap_or(Commands::Tui);
    let interactive = matches!(command, Commands::Tui);
    logging::init(&config.log, interactive)?;
    tracing::debug!(config = %config_path.display(), "configuration loaded");

    match command {
        Commands::Tui => tui::run(&config).await,
        Commands::Principles { json } => commands::principles::execute(json),
        Commands::Suggest {
            principle,
            no_delay,
        } => commands::suggest::execute(&config, &principle, no_delay).await,
    }
}
