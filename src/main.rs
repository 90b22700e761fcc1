//! Strictly Timetravel - terminal front-end
//!
//! Plays, shows or resets the game stored under the configured namespace.

#![warn(missing_docs)]

mod cli;
mod terminal;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use strictly_timetravel::{Backend, EngineConfig, HistoryController};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = resolve_config(&cli)?;
    run(cli.command, &config)
}

/// Merges the config file with command-line overrides.
#[instrument(skip(cli), fields(path = %cli.config.display()))]
fn resolve_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = EngineConfig::from_file_or_default(&cli.config)?;
    if let Some(namespace) = &cli.namespace {
        config = config.with_namespace(namespace.clone());
    }
    if let Some(db_path) = &cli.db_path {
        config = config.with_db_path(db_path.clone());
    }
    if cli.memory {
        config = config.with_backend(Backend::Memory);
    }
    Ok(config)
}

/// Opens the configured game and runs one command against it.
#[instrument(skip(config), fields(namespace = %config.namespace(), backend = %config.backend()))]
fn run(command: Command, config: &EngineConfig) -> Result<()> {
    let store = config.open_store_or_memory();
    let mut game = HistoryController::open(store, config.namespace().clone());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match command {
        Command::Play => {
            let stdin = std::io::stdin();
            terminal::play(&mut game, stdin.lock(), &mut out)?;
        }
        Command::Show => terminal::render(&game, &mut out)?,
        Command::Reset => {
            game.reset();
            info!("Saved game cleared");
        }
    }
    Ok(())
}
