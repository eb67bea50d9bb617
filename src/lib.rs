//! Boardmirror library - live chessboard mirroring client
//!
//! Mirrors the state of a remote chessboard engine in a terminal:
//!
//! - **Board**: positional-notation decoding into a renderable tile grid
//! - **Captures**: per-side capture trays with bounded display slots
//! - **Sync**: push-channel subscription that refetches full state on every
//!   server-side change
//! - **Promotion**: the interaction flow for pending pawn promotions
//!
//! The engine is an external collaborator reached over HTTP plus a
//! WebSocket push channel; the client keeps no authoritative state.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod captures;
mod cli;
mod client;
mod clock;
mod promotion;
mod snapshot;
mod sync;
mod tui;

// Crate-level exports - board decoding
pub use board::{
    decode_position, encode_position, Piece, PieceRole, Side, SquareColor, Tile, START_POSITION,
};

// Crate-level exports - capture classification
pub use captures::{
    classify_captures, tray_slots, CaptureTrays, CapturedPiece, TraySlot, TRAY_SLOTS,
};

// Crate-level exports - clock formatting
pub use clock::format_clock;

// Crate-level exports - engine collaborator
pub use client::EngineClient;
pub use snapshot::{ClockSeconds, GameSnapshot};
pub use sync::{SyncChannel, RELOAD_EVENT};

// Crate-level exports - promotion flow
pub use promotion::{
    PromotionChoice, PromotionFlow, PromotionState, PROMOTION_ROLES,
};

// Crate-level exports - CLI and TUI entry points
pub use cli::{Cli, Command};
pub use tui::run_tui;
