//! Pawn-promotion interaction flow.
//!
//! The engine cannot resolve a promotion on its own: it raises
//! `pending_promotion` in the synced state and waits for the player to pick
//! a role. The flow here is a small state machine: `Idle` until the server
//! signals a pending promotion, `AwaitingChoice` while the modal chooser is
//! up, `Reporting` while exactly one report call is in flight. A failed
//! report returns to `AwaitingChoice` so the player can retry.

use tracing::debug;

use crate::board::{Piece, PieceRole, Side};
use crate::snapshot::GameSnapshot;

/// Roles offered to a promoting pawn, in display order.
pub const PROMOTION_ROLES: [PieceRole; 4] = [
    PieceRole::Queen,
    PieceRole::Knight,
    PieceRole::Rook,
    PieceRole::Bishop,
];

/// A promotion pick: consumed by exactly one report call, then discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionChoice {
    /// Side the promoting pawn belongs to.
    pub side: Side,
    /// Chosen role.
    pub role: PieceRole,
}

impl PromotionChoice {
    /// Wire symbol for the choice; case encodes the side.
    pub fn symbol(self) -> char {
        Piece {
            side: self.side,
            role: self.role,
        }
        .symbol()
    }
}

/// States of the promotion flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromotionState {
    /// No promotion pending.
    #[default]
    Idle,
    /// The chooser is up, waiting for the player.
    AwaitingChoice {
        /// Side whose pawn is promoting; determines the offered casing.
        side: Side,
    },
    /// A report call is in flight; further picks are ignored.
    Reporting {
        /// The pick being reported.
        choice: PromotionChoice,
    },
}

/// Local promotion state machine, driven by synced snapshots and key input.
#[derive(Debug, Default)]
pub struct PromotionFlow {
    state: PromotionState,
}

impl PromotionFlow {
    /// Creates an idle flow.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> PromotionState {
        self.state
    }

    /// Side awaiting a choice, if the chooser is up.
    pub fn awaiting_side(&self) -> Option<Side> {
        match self.state {
            PromotionState::AwaitingChoice { side } => Some(side),
            _ => None,
        }
    }

    /// Feeds a freshly synced snapshot into the flow.
    ///
    /// A pending promotion opens the chooser for the side to move. A
    /// snapshot without one closes it again (the physical board can resolve
    /// a promotion without us). An in-flight report is left alone until its
    /// outcome arrives.
    pub fn on_sync(&mut self, snapshot: &GameSnapshot) {
        match self.state {
            PromotionState::Idle if *snapshot.pending_promotion() => {
                let side = *snapshot.player_to_move();
                debug!(side = %side.letter(), "Promotion pending, awaiting choice");
                self.state = PromotionState::AwaitingChoice { side };
            }
            PromotionState::AwaitingChoice { .. } if !snapshot.pending_promotion() => {
                debug!("Promotion resolved server-side, closing chooser");
                self.state = PromotionState::Idle;
            }
            _ => {}
        }
    }

    /// Registers the player's pick.
    ///
    /// Returns the choice to report, or `None` when no promotion awaits or a
    /// report is already in flight (duplicate rapid picks are ignored).
    pub fn choose(&mut self, role: PieceRole) -> Option<PromotionChoice> {
        let PromotionState::AwaitingChoice { side } = self.state else {
            return None;
        };
        let choice = PromotionChoice { side, role };
        debug!(piece = %choice.symbol(), "Promotion choice made, reporting");
        self.state = PromotionState::Reporting { choice };
        Some(choice)
    }

    /// Marks the in-flight report as accepted.
    pub fn report_succeeded(&mut self) {
        if let PromotionState::Reporting { .. } = self.state {
            self.state = PromotionState::Idle;
        }
    }

    /// Marks the in-flight report as failed; the chooser reopens so the
    /// player can retry.
    pub fn report_failed(&mut self) {
        if let PromotionState::Reporting { choice } = self.state {
            self.state = PromotionState::AwaitingChoice { side: choice.side };
        }
    }
}
