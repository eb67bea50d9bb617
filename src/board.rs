//! Core board types and positional-notation decoding.
//!
//! The engine describes board occupancy with FEN-style piece placement:
//! `/`-separated rows, one letter per piece (case encodes the side), digits
//! for runs of empty squares. The decoder turns that string into a flat,
//! row-major grid of renderable tiles and never fails: malformed input
//! degrades to empty squares.

use strum::EnumIter;

/// Standard starting position (piece placement only).
pub const START_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Side owning a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// White (uppercase piece letters, moves first).
    White,
    /// Black (lowercase piece letters).
    Black,
}

impl Side {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Wire letter for this side (`w` or `b`).
    pub fn letter(self) -> char {
        match self {
            Side::White => 'w',
            Side::Black => 'b',
        }
    }

    /// Parses a wire letter (`w`/`b`, case-insensitive).
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'w' => Some(Side::White),
            'b' => Some(Side::Black),
            _ => None,
        }
    }
}

/// Role of a piece.
///
/// Declaration order is the fixed tray display priority (king first,
/// pawn last) and is relied on by the capture classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
pub enum PieceRole {
    /// King.
    King,
    /// Queen.
    Queen,
    /// Rook.
    Rook,
    /// Bishop.
    Bishop,
    /// Knight.
    Knight,
    /// Pawn.
    Pawn,
}

impl PieceRole {
    /// Uppercase notation letter for this role.
    pub fn letter(self) -> char {
        match self {
            PieceRole::King => 'K',
            PieceRole::Queen => 'Q',
            PieceRole::Rook => 'R',
            PieceRole::Bishop => 'B',
            PieceRole::Knight => 'N',
            PieceRole::Pawn => 'P',
        }
    }

    /// Parses a notation letter (either case).
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'K' => Some(PieceRole::King),
            'Q' => Some(PieceRole::Queen),
            'R' => Some(PieceRole::Rook),
            'B' => Some(PieceRole::Bishop),
            'N' => Some(PieceRole::Knight),
            'P' => Some(PieceRole::Pawn),
            _ => None,
        }
    }
}

/// A concrete piece: side plus role, one notation symbol on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    /// Owning side.
    pub side: Side,
    /// Piece role.
    pub role: PieceRole,
}

impl Piece {
    /// Parses a notation symbol; uppercase is white, lowercase black.
    pub fn from_symbol(c: char) -> Option<Self> {
        let role = PieceRole::from_letter(c)?;
        let side = if c.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };
        Some(Self { side, role })
    }

    /// Notation symbol for this piece.
    pub fn symbol(self) -> char {
        match self.side {
            Side::White => self.role.letter(),
            Side::Black => self.role.letter().to_ascii_lowercase(),
        }
    }
}

/// Color of a board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareColor {
    /// Light square.
    Light,
    /// Dark square.
    Dark,
}

/// One renderable square of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// Square color, from absolute (row, file) parity.
    pub color: SquareColor,
    /// Occupying piece, if any.
    pub piece: Option<Piece>,
}

/// Color at absolute coordinates.
///
/// Computed from `(row + file)` parity rather than a running toggle, so
/// adjacent squares never share a color across row boundaries.
fn square_color(row: usize, file: usize) -> SquareColor {
    if (row + file) % 2 == 0 {
        SquareColor::Light
    } else {
        SquareColor::Dark
    }
}

/// Decodes piece-placement notation into a row-major tile grid.
///
/// Digits 1-8 expand to runs of empty tiles. Decoding a row stops at the
/// first space, so full FEN strings with side-to-move and castling metadata
/// can be passed as-is. Characters that are neither digits nor known piece
/// letters yield empty tiles; an empty input yields an empty grid.
pub fn decode_position(notation: &str) -> Vec<Tile> {
    let mut tiles = Vec::new();
    if notation.is_empty() {
        return tiles;
    }

    for (row, row_str) in notation.split('/').enumerate() {
        let mut file = 0usize;
        for c in row_str.chars() {
            if c == ' ' {
                // Trailing metadata (side to move, castling rights, ...).
                break;
            }
            if let Some(n) = c.to_digit(10) {
                for _ in 0..n {
                    tiles.push(Tile {
                        color: square_color(row, file),
                        piece: None,
                    });
                    file += 1;
                }
            } else {
                tiles.push(Tile {
                    color: square_color(row, file),
                    piece: Piece::from_symbol(c),
                });
                file += 1;
            }
        }
    }

    tiles
}

/// Re-encodes a tile grid into piece-placement notation.
///
/// Inverse of [`decode_position`] for any grid decoded from well-formed
/// 8-wide notation.
pub fn encode_position(tiles: &[Tile]) -> String {
    tiles
        .chunks(8)
        .map(|row| {
            let mut out = String::new();
            let mut empty_run = 0u32;
            for tile in row {
                match tile.piece {
                    Some(piece) => {
                        if empty_run > 0 {
                            out.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        out.push(piece.symbol());
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                out.push_str(&empty_run.to_string());
            }
            out
        })
        .collect::<Vec<_>>()
        .join("/")
}
