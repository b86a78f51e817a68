//! gz CLI
//!
//! Bootstraps developer package managers (Homebrew, asdf, nvm, rbenv, pyenv,
//! SDKMAN!) in dependency order.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, PmAction};
use commands::ConfigSource;
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let Cli {
        verbose,
        config,
        config_dir,
        command,
    } = Cli::parse();

    init_logging(verbose);

    let source = ConfigSource {
        file: config,
        global_dir: config_dir,
    };

    match command {
        Commands::Pm { action } => execute_pm(action, &source, verbose).await,
    }
}

async fn execute_pm(action: PmAction, source: &ConfigSource, verbose: bool) -> Result<()> {
    let (manager, config) = commands::load_manager(source)?;
    match action {
        PmAction::Bootstrap(args) => {
            commands::run_bootstrap(&manager, &config, &args, verbose).await
        }
        PmAction::Order { managers } => commands::run_order(&manager, &managers),
        PmAction::Deps { manager: name } => commands::run_deps(&manager, &name),
    }
}

/// Log to stderr so `--json` output on stdout stays parseable.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
    tracing::debug!("verbose mode enabled");
}
