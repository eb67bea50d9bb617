//! Push-channel synchronization with the engine.
//!
//! The engine never streams state over the socket. It pushes a bare
//! `reload_backend` frame whenever the board changed, and the client
//! refetches the full state over HTTP. Fresh snapshots fan out to
//! subscribers through a `watch` channel; a failed fetch keeps the previous
//! snapshot in place.

use anyhow::{Context, Result};
use futures::StreamExt;
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_websockets::{ClientBuilder, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, instrument, warn};

use crate::client::EngineClient;
use crate::snapshot::GameSnapshot;

/// Text frame the engine pushes when the board state changed. No payload.
pub const RELOAD_EVENT: &str = "reload_backend";

/// Live subscription to the engine's state.
///
/// Owns the socket task for its whole lifetime: constructed on subscribe,
/// torn down on drop. After the drop no snapshot is published and an
/// in-flight fetch result is discarded unseen.
#[derive(Debug)]
pub struct SyncChannel {
    snapshots: watch::Receiver<GameSnapshot>,
    task: JoinHandle<()>,
}

impl SyncChannel {
    /// Opens the push channel and primes subscribers with an initial full
    /// fetch before any reload can arrive.
    #[instrument(skip(client), fields(ws_url = %client.ws_url()))]
    pub async fn connect(client: EngineClient) -> Result<Self> {
        let ws_url = client.ws_url();
        let (ws, _response) = ClientBuilder::new()
            .uri(&ws_url)
            .context("Invalid push-channel URL")?
            .connect()
            .await
            .context("Failed to connect push channel")?;

        info!("Push channel connected");

        let initial = client
            .fetch_state()
            .await
            .context("Initial state fetch failed")?;
        let (tx, snapshots) = watch::channel(initial);

        let task = tokio::spawn(run_sync_loop(ws, client, tx));
        Ok(Self { snapshots, task })
    }

    /// New subscription to published snapshots. The receiver already holds
    /// the latest snapshot.
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshots.clone()
    }
}

impl Drop for SyncChannel {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Reads reload notifications and republishes fresh snapshots.
///
/// Sequential by construction: a notification arriving while a fetch is in
/// flight waits in the socket buffer until that fetch completes, so
/// subscribers never observe interleaved partial updates and the last
/// published snapshot always reflects the latest completed fetch.
async fn run_sync_loop(
    mut ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
    client: EngineClient,
    tx: watch::Sender<GameSnapshot>,
) {
    while let Some(incoming) = ws.next().await {
        let message = match incoming {
            Ok(message) => message,
            Err(error) => {
                warn!(%error, "Push channel error, closing");
                break;
            }
        };

        let Some(text) = message.as_text() else {
            continue;
        };
        if text != RELOAD_EVENT {
            debug!(frame = %text, "Ignoring unknown push frame");
            continue;
        }

        debug!("Board state changed, refetching");
        match client.fetch_state().await {
            Ok(snapshot) => {
                if tx.send(snapshot).is_err() {
                    debug!("All subscribers gone, closing push channel");
                    break;
                }
            }
            Err(error) => {
                // Previous snapshot stays published; the next reload retries.
                warn!(%error, "State fetch failed, keeping previous snapshot");
            }
        }
    }

    debug!("Sync loop ended");
}
