//! Cached engine state and its wire format.
//!
//! The client never mutates game state: each sync replaces the whole
//! [`GameSnapshot`]. Wire fields the server omits or garbles coerce to
//! defaults instead of failing the fetch (input-shape errors are not worth a
//! blank board).

use derive_getters::Getters;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::board::Side;
use crate::captures::CapturedPiece;

/// Per-side clock readings in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct ClockSeconds {
    /// White's remaining seconds.
    #[serde(default)]
    pub white: u64,
    /// Black's remaining seconds.
    #[serde(default)]
    pub black: u64,
}

impl ClockSeconds {
    /// Reading for the given side.
    pub fn for_side(self, side: Side) -> u64 {
        match side {
            Side::White => self.white,
            Side::Black => self.black,
        }
    }
}

/// Read-only snapshot of the engine's game state.
///
/// Owned by the server; the client holds the last synced copy and replaces
/// it wholesale on every sync event.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct GameSnapshot {
    /// Piece-placement notation, possibly with trailing FEN metadata.
    board_fen: String,
    /// Side to move.
    player_to_move: Side,
    /// Full replacement list of captured pieces.
    captured_pieces: Vec<CapturedPiece>,
    /// Both clocks.
    clocks: ClockSeconds,
    /// True while the engine waits for a promotion choice.
    pending_promotion: bool,
}

impl GameSnapshot {
    /// Builds a snapshot from already-parsed parts.
    pub fn new(
        board_fen: impl Into<String>,
        player_to_move: Side,
        captured_pieces: Vec<CapturedPiece>,
        clocks: ClockSeconds,
        pending_promotion: bool,
    ) -> Self {
        Self {
            board_fen: board_fen.into(),
            player_to_move,
            captured_pieces,
            clocks,
            pending_promotion,
        }
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board_fen: String::new(),
            player_to_move: Side::White,
            captured_pieces: Vec::new(),
            clocks: ClockSeconds::default(),
            pending_promotion: false,
        }
    }
}

/// Top-level body of the full-state endpoint.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct EngineData {
    #[serde(default)]
    board_infos: BoardInfos,
}

#[derive(Debug, Default, Deserialize)]
struct BoardInfos {
    #[serde(default)]
    board_fen: String,
    #[serde(default)]
    player_to_move: String,
    #[serde(default, deserialize_with = "lenient_captures")]
    captured_pieces: Vec<CapturedPiece>,
    #[serde(default, deserialize_with = "lenient_clocks")]
    clock_seconds: ClockSeconds,
    #[serde(default, deserialize_with = "lenient")]
    pending_promotion: bool,
}

impl From<EngineData> for GameSnapshot {
    fn from(data: EngineData) -> Self {
        let infos = data.board_infos;
        let player_to_move = infos
            .player_to_move
            .chars()
            .next()
            .and_then(Side::from_letter)
            .unwrap_or(Side::White);
        Self {
            board_fen: infos.board_fen,
            player_to_move,
            captured_pieces: infos.captured_pieces,
            clocks: infos.clock_seconds,
            pending_promotion: infos.pending_promotion,
        }
    }
}

/// Deserializes a value of any shape, falling back to the default on
/// mismatch instead of failing the enclosing document.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Clock coercion: the wire shape is an object with per-side fields. Any
/// other shape (serde would otherwise read a two-element sequence as the
/// struct's fields) coerces to zeroed clocks.
fn lenient_clocks<'de, D>(deserializer: D) -> Result<ClockSeconds, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(ClockSeconds::default());
    }
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Captured-piece list coercion: non-array input becomes an empty list,
/// malformed entries are skipped.
fn lenient_captures<'de, D>(deserializer: D) -> Result<Vec<CapturedPiece>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(entries) = value else {
        return Ok(Vec::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect())
}
