//! Captured pieces, derived from the move history
//!
//! Nothing here is stored by the game store. Captures are recomputed from the
//! history whenever a view asks, so undo and reset never leave stale entries.
//!
//! # Material Values
//!
//! Standard values in pawns: P 1, N 3, B 3, R 5, Q 9. The king is never
//! captured and counts 0.
//!
//! Positive advantage means White is ahead.

use crate::game::resources::history::MoveHistory;
use crate::game::types::{PieceColor, PieceKind};
use serde::Serialize;

/// Pieces taken by each side
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CapturedPieces {
    /// Black pieces taken by White
    pub by_white: Vec<PieceKind>,
    /// White pieces taken by Black
    pub by_black: Vec<PieceKind>,
}

impl CapturedPieces {
    /// Partition every capture in `history` by the side that made it
    pub fn from_history(history: &MoveHistory) -> Self {
        let mut captured = Self::default();
        for record in history.moves() {
            if let Some(kind) = record.captured {
                match record.color {
                    PieceColor::White => captured.by_white.push(kind),
                    PieceColor::Black => captured.by_black.push(kind),
                }
            }
        }
        captured
    }

    /// Material balance in pawn units
    pub fn material_advantage(&self) -> i32 {
        let white: i32 = self.by_white.iter().copied().map(piece_value).sum();
        let black: i32 = self.by_black.iter().copied().map(piece_value).sum();
        white - black
    }
}

/// Pawn-unit value of a piece
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight | PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        PieceKind::King => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::MoveRecord;

    fn capture(color: PieceColor, taken: Option<PieceKind>) -> MoveRecord {
        MoveRecord {
            from: "d4".parse().unwrap(),
            to: "e5".parse().unwrap(),
            piece: PieceKind::Pawn,
            color,
            captured: taken,
            promotion: None,
            is_castling: false,
            is_en_passant: false,
            san: "dxe5".to_string(),
        }
    }

    #[test]
    fn test_empty_history() {
        let captured = CapturedPieces::from_history(&MoveHistory::default());
        assert!(captured.by_white.is_empty());
        assert!(captured.by_black.is_empty());
        assert_eq!(captured.material_advantage(), 0);
    }

    #[test]
    fn test_captures_credit_the_mover() {
        //! White takes a queen, Black takes a rook and a pawn: White +3
        let mut history = MoveHistory::default();
        history.add_move(capture(PieceColor::White, Some(PieceKind::Queen)));
        history.add_move(capture(PieceColor::Black, Some(PieceKind::Rook)));
        history.add_move(capture(PieceColor::White, None));
        history.add_move(capture(PieceColor::Black, Some(PieceKind::Pawn)));

        let captured = CapturedPieces::from_history(&history);
        assert_eq!(captured.by_white, vec![PieceKind::Queen]);
        assert_eq!(captured.by_black, vec![PieceKind::Rook, PieceKind::Pawn]);
        assert_eq!(captured.material_advantage(), 3);
    }

    #[test]
    fn test_piece_values() {
        assert_eq!(piece_value(PieceKind::Pawn), 1);
        assert_eq!(piece_value(PieceKind::Bishop), 3);
        assert_eq!(piece_value(PieceKind::Queen), 9);
        assert_eq!(piece_value(PieceKind::King), 0);
    }
}
