//! Selection resource for tracking the selected piece and its legal moves
//!
//! Fields are private so the pairing holds: `legal_moves` is non-empty only
//! while a square is selected. Whether the selected piece belongs to the side
//! to move is the store's job, which only calls [`Selection::select`] after
//! checking ownership.

use crate::board::Square;
use crate::game::types::MoveRecord;

/// Currently selected square and the moves available from it
#[derive(Debug, Default, Clone)]
pub struct Selection {
    selected_square: Option<Square>,
    legal_moves: Vec<MoveRecord>,
}

impl Selection {
    /// Select `square` with its full legal move set
    pub fn select(&mut self, square: Square, legal_moves: Vec<MoveRecord>) {
        self.selected_square = Some(square);
        self.legal_moves = legal_moves;
    }

    pub fn clear(&mut self) {
        self.selected_square = None;
        self.legal_moves.clear();
    }

    pub fn is_selected(&self) -> bool {
        self.selected_square.is_some()
    }

    pub fn selected_square(&self) -> Option<Square> {
        self.selected_square
    }

    pub fn legal_moves(&self) -> &[MoveRecord] {
        &self.legal_moves
    }

    /// Distinct destination squares, in first-seen order
    ///
    /// A promoting pawn has one move per promotion piece but a single target.
    pub fn highlighted_squares(&self) -> Vec<Square> {
        let mut targets: Vec<Square> = Vec::with_capacity(self.legal_moves.len());
        for record in &self.legal_moves {
            if !targets.contains(&record.to) {
                targets.push(record.to);
            }
        }
        targets
    }

    /// Whether some cached move ends on `square`
    pub fn is_target(&self, square: Square) -> bool {
        self.legal_moves.iter().any(|record| record.to == square)
    }

    /// Whether `from`-`to` is one of the cached moves
    pub fn allows(&self, from: Square, to: Square) -> bool {
        self.legal_moves
            .iter()
            .any(|record| record.from == from && record.to == to)
    }
}
