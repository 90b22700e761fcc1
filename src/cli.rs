//! Command-line interface for strictly_timetravel.

use clap::{Parser, Subcommand};

/// Strictly Timetravel - tic-tac-toe with a rewindable, persisted history
#[derive(Parser, Debug)]
#[command(name = "strictly_timetravel")]
#[command(about = "Tic-tac-toe with time travel", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the engine config file (TOML). Missing files mean defaults.
    #[arg(short, long, global = true, default_value = "timetravel.toml")]
    pub config: std::path::PathBuf,

    /// Override the slot namespace
    #[arg(long, global = true)]
    pub namespace: Option<String>,

    /// Override the SQLite database path
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Keep the game in memory only
    #[arg(long, global = true)]
    pub memory: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play interactively on stdin/stdout
    Play,

    /// Print the saved game and exit
    Show,

    /// Forget the saved game
    Reset,
}
