//! Capture classification for the piece trays.
//!
//! The server ships a full replacement list of captured pieces on every
//! sync. The classifier splits that list per side, orders it by the fixed
//! display priority (king, queen, rook, bishop, knight, pawn), and groups it
//! into a bounded number of tray slots.

use derive_getters::Getters;
use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::IntoEnumIterator;

use crate::board::{PieceRole, Side};

/// Number of display slots per tray. When more distinct roles than this are
/// captured, the lowest-priority roles are dropped.
pub const TRAY_SLOTS: usize = 5;

/// A single captured-piece record from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapturedPiece {
    /// Side the piece belonged to.
    pub side: Side,
    /// Role of the captured piece.
    pub role: PieceRole,
}

impl Serialize for CapturedPiece {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut record = serializer.serialize_struct("CapturedPiece", 2)?;
        record.serialize_field("color", &self.side.letter().to_string())?;
        record.serialize_field("role", &self.role.letter().to_string())?;
        record.end()
    }
}

impl<'de> Deserialize<'de> for CapturedPiece {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            color: String,
            role: String,
        }

        let raw = Raw::deserialize(deserializer)?;
        let side = raw
            .color
            .chars()
            .next()
            .and_then(Side::from_letter)
            .ok_or_else(|| D::Error::custom(format!("unknown color tag: {:?}", raw.color)))?;
        let role = raw
            .role
            .chars()
            .next()
            .and_then(PieceRole::from_letter)
            .ok_or_else(|| D::Error::custom(format!("unknown role tag: {:?}", raw.role)))?;
        Ok(Self { side, role })
    }
}

/// Per-side ordered capture lists, ready for tray rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters)]
pub struct CaptureTrays {
    /// Captured white pieces, in display priority order.
    white: Vec<PieceRole>,
    /// Captured black pieces, in display priority order.
    black: Vec<PieceRole>,
}

impl CaptureTrays {
    /// Returns the tray for the given side.
    pub fn for_side(&self, side: Side) -> &[PieceRole] {
        match side {
            Side::White => &self.white,
            Side::Black => &self.black,
        }
    }
}

/// Splits capture records per side and sorts each list by display priority.
///
/// Input ordering is irrelevant; the output is deterministic for a given
/// multiset of records.
pub fn classify_captures(records: &[CapturedPiece]) -> CaptureTrays {
    let mut trays = CaptureTrays::default();
    for record in records {
        match record.side {
            Side::White => trays.white.push(record.role),
            Side::Black => trays.black.push(record.role),
        }
    }
    trays.white.sort();
    trays.black.sort();
    trays
}

/// One occupied tray slot: a role and how many of it were captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraySlot {
    /// Role displayed in this slot.
    pub role: PieceRole,
    /// Number of captured pieces of that role, stacked in the slot.
    pub count: usize,
}

/// Groups an ordered capture list into at most [`TRAY_SLOTS`] slots.
///
/// Duplicates of a role stack in one slot. Overflow beyond the slot budget
/// drops the lowest-priority distinct roles.
pub fn tray_slots(roles: &[PieceRole]) -> Vec<TraySlot> {
    let mut slots = Vec::new();
    for role in PieceRole::iter() {
        let count = roles.iter().filter(|r| **r == role).count();
        if count > 0 {
            slots.push(TraySlot { role, count });
            if slots.len() == TRAY_SLOTS {
                break;
            }
        }
    }
    slots
}
