//! Application state for the mirror client.

use tracing::debug;

use crate::board::{decode_position, Side, Tile};
use crate::captures::{classify_captures, CaptureTrays};
use crate::promotion::PromotionFlow;
use crate::snapshot::GameSnapshot;

/// Main application state: the cached snapshot plus everything derived from
/// it for rendering.
pub struct App {
    snapshot: GameSnapshot,
    tiles: Vec<Tile>,
    trays: CaptureTrays,
    promotion: PromotionFlow,
    status_message: String,
}

impl App {
    /// Creates an application with an empty board, pending the first sync.
    pub fn new() -> Self {
        Self {
            snapshot: GameSnapshot::default(),
            tiles: Vec::new(),
            trays: CaptureTrays::default(),
            promotion: PromotionFlow::new(),
            status_message: "Waiting for engine state...".to_string(),
        }
    }

    /// Replaces the cached snapshot and rederives tiles and trays.
    pub fn apply_snapshot(&mut self, snapshot: GameSnapshot) {
        debug!(fen = %snapshot.board_fen(), "Applying synced snapshot");
        self.tiles = decode_position(snapshot.board_fen());
        self.trays = classify_captures(snapshot.captured_pieces());
        self.promotion.on_sync(&snapshot);
        self.status_message = match snapshot.player_to_move() {
            Side::White => "White to move".to_string(),
            Side::Black => "Black to move".to_string(),
        };
        self.snapshot = snapshot;
    }

    /// Cached snapshot.
    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    /// Decoded board grid.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Classified capture trays.
    pub fn trays(&self) -> &CaptureTrays {
        &self.trays
    }

    /// Promotion flow.
    pub fn promotion(&self) -> &PromotionFlow {
        &self.promotion
    }

    /// Mutable promotion flow, for choice and report-outcome transitions.
    pub fn promotion_mut(&mut self) -> &mut PromotionFlow {
        &mut self.promotion
    }

    /// Current status line.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Overrides the status line (transport failures, retry hints).
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
