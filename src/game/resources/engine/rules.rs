//! Rules engine capability surface
//!
//! The game store never inspects chess rules itself. Legality, check detection,
//! move application, undo and serialization all go through this trait, which keeps
//! the store testable against scripted engines and lets the production engine be
//! swapped without touching the interaction code.
//!
//! # Contract
//!
//! - `apply_move` is legality-checked. Rejection is `Err(EngineError::IllegalMove)`
//!   and must leave the engine untouched.
//! - Any other error means the instance can no longer be trusted. The store
//!   discards it and builds a fresh one via `Default`.
//! - `turn()` and `fen()` always describe the same position.

use crate::board::Square;
use crate::core::error::EngineResult;
use crate::game::types::{MoveRecord, PieceColor, PieceInfo, PieceKind};

/// Chess rules as seen by the interaction core
pub trait RulesEngine: Send {
    /// Occupant of `square`, if any
    fn piece_at(&self, square: Square) -> Option<PieceInfo>;

    /// Side to move
    fn turn(&self) -> PieceColor;

    /// Every legal move starting on `square`, in engine order
    ///
    /// Empty when the square is empty or holds a piece of the side not to move.
    fn moves(&self, square: Square) -> Vec<MoveRecord>;

    /// Apply the move `from`-`to`
    ///
    /// `promotion` selects the piece for a promoting pawn move and is ignored
    /// otherwise.
    fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> EngineResult<MoveRecord>;

    /// Take back the last applied move, `None` when nothing has been played
    fn undo(&mut self) -> Option<MoveRecord>;

    fn is_checkmate(&self) -> bool;

    fn is_stalemate(&self) -> bool;

    /// Any drawn outcome: stalemate, insufficient material, fifty-move rule or
    /// threefold repetition
    fn is_draw(&self) -> bool;

    /// Whether the side to move is in check
    fn in_check(&self) -> bool;

    /// Serialized position (FEN)
    fn fen(&self) -> String;

    /// Replace the current position with `fen`, clearing undo history
    ///
    /// On error the engine must be treated as faulted.
    fn load(&mut self, fen: &str) -> EngineResult<()>;
}
