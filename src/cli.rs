//! Command-line interface for boardmirror.

use clap::{Parser, Subcommand};

/// Boardmirror - terminal mirror for a physical chessboard engine
#[derive(Parser, Debug)]
#[command(name = "boardmirror")]
#[command(about = "Mirrors a chessboard engine's live state in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the terminal mirror client
    Tui {
        /// Engine base URL
        #[arg(long, default_value = "http://localhost:5000")]
        server_url: String,
    },

    /// Ask the engine to start a new game
    NewGame {
        /// Engine base URL
        #[arg(long, default_value = "http://localhost:5000")]
        server_url: String,

        /// Starting position (piece placement notation); standard start if
        /// omitted
        #[arg(long)]
        fen: Option<String>,
    },
}
