//! Piece and move records exchanged with the rules engine
//!
//! The rules engine owns its own representation of pieces and moves. Everything
//! it hands back is converted into the types below at the boundary, so the store
//! and controllers never depend on engine internals.

use crate::board::Square;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side to move / owner of a piece
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    #[default]
    White,
    Black,
}

impl PieceColor {
    pub fn opponent(self) -> Self {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }

    /// Display name ("White" / "Black")
    pub fn name(self) -> &'static str {
        match self {
            PieceColor::White => "White",
            PieceColor::Black => "Black",
        }
    }
}

/// Kind of chess piece
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Lowercase symbol as used in FEN and SAN (`p`, `n`, `b`, `r`, `q`, `k`)
    pub fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Parse a piece symbol, either case
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Lowercase English name ("pawn", "knight", ...)
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }

    /// Whether a pawn may promote to this kind
    pub fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }
}

/// Occupant of a square
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceInfo {
    pub kind: PieceKind,
    pub color: PieceColor,
}

impl PieceInfo {
    pub fn new(kind: PieceKind, color: PieceColor) -> Self {
        Self { kind, color }
    }
}

/// A move produced by the rules engine
///
/// `from`/`to` are always the squares the user interacts with: for castling that
/// is the king's origin and the king's destination (g1/c1/g8/c8), never the rook.
/// Identity is the record's index in the move history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub piece: PieceKind,
    pub color: PieceColor,
    pub captured: Option<PieceKind>,
    pub promotion: Option<PieceKind>,
    pub is_castling: bool,
    pub is_en_passant: bool,
    /// Standard algebraic notation, e.g. `"Nf3"` or `"exd5"`
    pub san: String,
}

impl MoveRecord {
    /// Short label used by the status panel: piece symbol, origin, destination (`"Pe2-e4"`)
    pub fn label(&self) -> String {
        format!(
            "{}{}-{}",
            self.piece.symbol().to_ascii_uppercase(),
            self.from,
            self.to
        )
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.san)
    }
}
