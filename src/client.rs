//! HTTP client for the chessboard engine's REST surface.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use crate::promotion::PromotionChoice;
use crate::snapshot::{EngineData, GameSnapshot};

/// Bound on the full-state fetch and the promotion report. Expiry surfaces
/// as a retryable transport error like any other failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the engine's HTTP endpoints.
#[derive(Debug, Clone)]
pub struct EngineClient {
    base_url: String,
    client: reqwest::Client,
}

impl EngineClient {
    /// Creates a client for the engine at `base_url` (e.g.
    /// `http://localhost:5000`).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Push-channel URL derived from the base URL (`http` becomes `ws`).
    pub fn ws_url(&self) -> String {
        format!("{}/ws", self.base_url.replacen("http", "ws", 1))
    }

    /// Fetches the full current game state. Always a complete snapshot,
    /// never a delta.
    #[instrument(skip(self))]
    pub async fn fetch_state(&self) -> Result<GameSnapshot> {
        let url = format!("{}/api/v1/chess_engine_data", self.base_url);
        let data: EngineData = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("Failed to decode engine data")?;

        let snapshot = GameSnapshot::from(data);
        debug!(fen = %snapshot.board_fen(), "Fetched engine state");
        Ok(snapshot)
    }

    /// Reports the player's promotion choice.
    #[instrument(skip(self), fields(piece = %choice.symbol()))]
    pub async fn report_promotion(&self, choice: PromotionChoice) -> Result<()> {
        let url = format!("{}/api/v1/set_promotion_to", self.base_url);
        let body = serde_json::json!({ "promotion_piece": choice.symbol().to_string() });

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
                .unwrap_or_else(|| "no error message".to_string());
            anyhow::bail!("Promotion report rejected: {status} - {message}");
        }

        info!("Promotion choice accepted");
        Ok(())
    }

    /// Asks the engine to start a new game from the given position.
    #[instrument(skip(self))]
    pub async fn new_game(&self, starting_position: &str) -> Result<()> {
        let url = format!("{}/api/v1/new_game", self.base_url);
        let body = serde_json::json!({ "starting_position": starting_position });

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("New game request rejected: {status}");
        }

        info!("New game started");
        Ok(())
    }
}
