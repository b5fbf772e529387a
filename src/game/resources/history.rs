//! Move history resource

use crate::game::types::MoveRecord;
use serde::Serialize;

/// Moves played since the last reset or load, oldest first
///
/// Append-only except for [`MoveHistory::pop`] (undo) and
/// [`MoveHistory::clear`] (reset/load). A move's identity is its index here.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct MoveHistory {
    moves: Vec<MoveRecord>,
}

impl MoveHistory {
    pub fn add_move(&mut self, record: MoveRecord) {
        self.moves.push(record);
    }

    pub fn pop(&mut self) -> Option<MoveRecord> {
        self.moves.pop()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// Get the last move made
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.moves.last()
    }

    /// Check if there are moves that can be undone
    pub fn can_undo(&self) -> bool {
        !self.moves.is_empty()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    /// Full-move number of the move about to be played (1 at the start)
    pub fn move_number(&self) -> usize {
        self.moves.len() / 2 + 1
    }

    /// Status panel label of the last move, e.g. `"Pe2-e4"`
    pub fn last_move_label(&self) -> Option<String> {
        self.last_move().map(MoveRecord::label)
    }
}
