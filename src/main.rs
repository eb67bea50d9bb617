//! Boardmirror - terminal mirror for a physical chessboard engine.

use anyhow::Result;
use boardmirror::{run_tui, Cli, Command, EngineClient, START_POSITION};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Tui { server_url } => run_tui(server_url).await,
        Command::NewGame { server_url, fen } => run_new_game(server_url, fen).await,
    }
}

/// Sends a new-game request and exits.
async fn run_new_game(server_url: String, fen: Option<String>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let client = EngineClient::new(&server_url)?;
    let position = fen.unwrap_or_else(|| START_POSITION.to_string());

    info!(position = %position, "Requesting new game");
    client.new_game(&position).await?;
    println!("New game started from: {position}");

    Ok(())
}
