//! Chess engine resource backed by `shakmaty`
//!
//! [`ShakmatyEngine`] is the single source of truth for chess rules in the
//! application:
//!
//! - Move validation and legal move generation
//! - Check/checkmate/stalemate detection
//! - Draw detection (insufficient material, fifty-move rule, threefold repetition)
//! - FEN serialization and loading
//!
//! `shakmaty` positions are immutable values, so undo is implemented by keeping
//! the position that preceded every applied move.
//!
//! # Coordinate System
//!
//! - **Crate squares**: [`Square`] with file/rank indices 0-7
//! - **Engine squares**: `shakmaty::Square`, built from `shakmaty::File`/`shakmaty::Rank`
//! - Conversion helpers: `to_engine_square()` and `from_engine_square()`

use crate::board::{File, Rank, Square};
use crate::core::error::{EngineError, EngineResult};
use crate::game::resources::engine::rules::RulesEngine;
use crate::game::types::{MoveRecord, PieceColor, PieceInfo, PieceKind};
use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Position, Role};
use tracing::{debug, trace};

/// Fifty full moves without a capture or pawn move
const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// Occurrences of the same position that make a repetition draw
const REPETITION_LIMIT: usize = 3;

/// Position and bookkeeping saved before a move is applied
#[derive(Debug, Clone)]
struct Ply {
    previous: Chess,
    record: MoveRecord,
}

/// Production rules engine
#[derive(Debug, Clone)]
pub struct ShakmatyEngine {
    position: Chess,
    /// One entry per applied move, oldest first
    plies: Vec<Ply>,
    /// Repetition key of every position reached since the last load, current last
    seen_positions: Vec<String>,
}

impl Default for ShakmatyEngine {
    fn default() -> Self {
        Self::from_position(Chess::default())
    }
}

impl ShakmatyEngine {
    /// Engine seeded from a FEN string
    pub fn from_fen(fen: &str) -> EngineResult<Self> {
        let mut engine = Self::default();
        engine.load(fen)?;
        Ok(engine)
    }

    fn from_position(position: Chess) -> Self {
        let key = repetition_key(&position);
        Self {
            position,
            plies: Vec::new(),
            seen_positions: vec![key],
        }
    }

    /// Convert a crate square to the engine's square type
    #[inline]
    pub fn to_engine_square(square: Square) -> shakmaty::Square {
        shakmaty::Square::from_coords(
            shakmaty::File::new(u32::from(square.file().index())),
            shakmaty::Rank::new(u32::from(square.rank().index())),
        )
    }

    /// Convert an engine square to the crate square type
    #[inline]
    pub fn from_engine_square(square: shakmaty::Square) -> Square {
        let file = File::from_char(square.file().char());
        let rank = Rank::from_char(square.rank().char());
        match (file, rank) {
            (Some(file), Some(rank)) => Square::from_parts(file, rank),
            // shakmaty files/ranks are always a-h/1-8
            _ => unreachable!("engine square {square} outside a1-h8"),
        }
    }

    pub fn role_to_kind(role: Role) -> PieceKind {
        match role {
            Role::Pawn => PieceKind::Pawn,
            Role::Knight => PieceKind::Knight,
            Role::Bishop => PieceKind::Bishop,
            Role::Rook => PieceKind::Rook,
            Role::Queen => PieceKind::Queen,
            Role::King => PieceKind::King,
        }
    }

    pub fn kind_to_role(kind: PieceKind) -> Role {
        match kind {
            PieceKind::Pawn => Role::Pawn,
            PieceKind::Knight => Role::Knight,
            PieceKind::Bishop => Role::Bishop,
            PieceKind::Rook => Role::Rook,
            PieceKind::Queen => Role::Queen,
            PieceKind::King => Role::King,
        }
    }

    pub fn color_from_engine(color: Color) -> PieceColor {
        match color {
            Color::White => PieceColor::White,
            Color::Black => PieceColor::Black,
        }
    }

    /// Squares a user picks to perform `m`: origin and destination
    ///
    /// Castling is encoded by shakmaty as king-takes-rook; the user drags the king
    /// two squares instead, so the destination becomes the g- or c-file square.
    fn interaction_squares(m: &Move) -> Option<(shakmaty::Square, shakmaty::Square)> {
        match m {
            Move::Normal { from, to, .. } => Some((*from, *to)),
            Move::EnPassant { from, to } => Some((*from, *to)),
            Move::Castle { king, rook } => {
                let king_file = if rook.file() > king.file() {
                    shakmaty::File::G
                } else {
                    shakmaty::File::C
                };
                Some((*king, shakmaty::Square::from_coords(king_file, rook.rank())))
            }
            Move::Put { .. } => None,
        }
    }

    /// Build the boundary record for a legal move in `position`
    fn record_for(position: &Chess, m: &Move) -> Option<MoveRecord> {
        let (from, to) = Self::interaction_squares(m)?;
        Some(MoveRecord {
            from: Self::from_engine_square(from),
            to: Self::from_engine_square(to),
            piece: Self::role_to_kind(m.role()),
            color: Self::color_from_engine(position.turn()),
            captured: m.capture().map(Self::role_to_kind),
            promotion: m.promotion().map(Self::role_to_kind),
            is_castling: m.is_castle(),
            is_en_passant: m.is_en_passant(),
            san: San::from_move(position, m.clone()).to_string(),
        })
    }

    /// Number of times the current position has occurred since the last load
    fn repetitions(&self) -> usize {
        match self.seen_positions.last() {
            Some(current) => self.seen_positions.iter().filter(|k| *k == current).count(),
            None => 0,
        }
    }
}

/// FEN of a position
fn full_fen(position: &Chess) -> String {
    Fen::from_position(position, EnPassantMode::Legal).to_string()
}

/// Board, side to move, castling rights and en passant square; move counters excluded
fn repetition_key(position: &Chess) -> String {
    full_fen(position)
        .split_whitespace()
        .take(4)
        .collect::<Vec<_>>()
        .join(" ")
}

impl RulesEngine for ShakmatyEngine {
    fn piece_at(&self, square: Square) -> Option<PieceInfo> {
        self.position
            .board()
            .piece_at(Self::to_engine_square(square))
            .map(|piece| {
                PieceInfo::new(
                    Self::role_to_kind(piece.role),
                    Self::color_from_engine(piece.color),
                )
            })
    }

    fn turn(&self) -> PieceColor {
        Self::color_from_engine(self.position.turn())
    }

    fn moves(&self, square: Square) -> Vec<MoveRecord> {
        let origin = Self::to_engine_square(square);
        let mut records = Vec::new();
        for m in &self.position.legal_moves() {
            if m.from() != Some(origin) {
                continue;
            }
            if let Some(record) = Self::record_for(&self.position, m) {
                records.push(record);
            }
        }
        trace!("[ENGINE] {} legal moves from {}", records.len(), square);
        records
    }

    fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> EngineResult<MoveRecord> {
        let wanted_promotion = promotion.unwrap_or(PieceKind::Queen);
        let legal_moves = self.position.legal_moves();

        let chosen = legal_moves.iter().find(|m| {
            let squares_match = Self::interaction_squares(m)
                .map(|(f, t)| {
                    Self::from_engine_square(f) == from && Self::from_engine_square(t) == to
                })
                .unwrap_or(false);
            let promotion_matches = m
                .promotion()
                .map(|role| role == Self::kind_to_role(wanted_promotion))
                .unwrap_or(true);
            squares_match && promotion_matches
        });

        let Some(chosen) = chosen else {
            debug!("[ENGINE] Rejected {}-{}", from, to);
            return Err(EngineError::IllegalMove {
                from: from.to_string(),
                to: to.to_string(),
            });
        };

        let record = Self::record_for(&self.position, chosen).ok_or_else(|| {
            EngineError::Corrupted(format!("legal move {from}-{to} has no board squares"))
        })?;

        let previous = self.position.clone();
        let next = previous
            .clone()
            .play(chosen.clone())
            .map_err(|e| EngineError::Corrupted(format!("legal move {from}-{to} failed: {e}")))?;

        self.position = next;
        self.seen_positions.push(repetition_key(&self.position));
        self.plies.push(Ply {
            previous,
            record: record.clone(),
        });

        debug!("[ENGINE] Played {} ({}-{})", record.san, from, to);
        Ok(record)
    }

    fn undo(&mut self) -> Option<MoveRecord> {
        let ply = self.plies.pop()?;
        self.position = ply.previous;
        self.seen_positions.pop();
        debug!("[ENGINE] Took back {}", ply.record.san);
        Some(ply.record)
    }

    fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    fn is_draw(&self) -> bool {
        self.position.is_stalemate()
            || self.position.is_insufficient_material()
            || self.position.halfmoves() >= FIFTY_MOVE_HALFMOVES
            || self.repetitions() >= REPETITION_LIMIT
    }

    fn in_check(&self) -> bool {
        self.position.is_check()
    }

    fn fen(&self) -> String {
        full_fen(&self.position)
    }

    fn load(&mut self, fen: &str) -> EngineResult<()> {
        let invalid = |reason: String| EngineError::InvalidPosition {
            fen: fen.to_string(),
            reason,
        };
        let parsed: Fen = fen.parse().map_err(|e| invalid(format!("{e}")))?;
        let position: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| invalid(format!("{e}")))?;

        *self = Self::from_position(position);
        debug!("[ENGINE] Loaded position {}", fen);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_square_conversion_roundtrip() {
        //! Every crate square maps to the identically named engine square and back
        for square in crate::board::all_squares() {
            let engine_square = ShakmatyEngine::to_engine_square(square);
            assert_eq!(engine_square.to_string(), square.to_string());
            assert_eq!(ShakmatyEngine::from_engine_square(engine_square), square);
        }
    }

    #[test]
    fn test_default_is_start_position() {
        let engine = ShakmatyEngine::default();
        assert_eq!(engine.fen(), START_FEN);
        assert_eq!(engine.turn(), PieceColor::White);
        assert_eq!(
            engine.piece_at(sq("e1")),
            Some(PieceInfo::new(PieceKind::King, PieceColor::White))
        );
        assert_eq!(engine.piece_at(sq("e4")), None);
    }

    #[test]
    fn test_pawn_moves_from_start() {
        let engine = ShakmatyEngine::default();
        let targets: Vec<String> = engine
            .moves(sq("e2"))
            .iter()
            .map(|m| m.to.to_string())
            .collect();
        assert_eq!(targets.len(), 2);
        assert!(targets.contains(&"e3".to_string()));
        assert!(targets.contains(&"e4".to_string()));
    }

    #[test]
    fn test_opponent_piece_has_no_moves() {
        //! Moves are only generated for the side to move
        let engine = ShakmatyEngine::default();
        assert!(engine.moves(sq("e7")).is_empty());
        assert!(engine.moves(sq("e4")).is_empty());
    }

    #[test]
    fn test_illegal_move_leaves_position() {
        let mut engine = ShakmatyEngine::default();
        let err = engine.apply_move(sq("e2"), sq("e5"), None).unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(engine.fen(), START_FEN);
    }

    #[test]
    fn test_apply_and_undo() {
        let mut engine = ShakmatyEngine::default();
        let record = engine.apply_move(sq("g1"), sq("f3"), None).unwrap();
        assert_eq!(record.san, "Nf3");
        assert_eq!(record.piece, PieceKind::Knight);
        assert_eq!(engine.turn(), PieceColor::Black);

        let undone = engine.undo().unwrap();
        assert_eq!(undone, record);
        assert_eq!(engine.fen(), START_FEN);
        assert!(engine.undo().is_none());
    }

    #[test]
    fn test_fen_tracks_moves_and_legal_en_passant() {
        //! The en passant square is only written when a capture is actually possible
        let mut engine = ShakmatyEngine::default();
        engine.apply_move(sq("e2"), sq("e4"), None).unwrap();
        assert_eq!(
            engine.fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );

        engine.apply_move(sq("g8"), sq("f6"), None).unwrap();
        engine.apply_move(sq("e4"), sq("e5"), None).unwrap();
        engine.apply_move(sq("d7"), sq("d5"), None).unwrap();
        assert_eq!(
            engine.fen(),
            "rnbqkb1r/ppp1pppp/5n2/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3"
        );
    }

    #[test]
    fn test_castling_uses_king_destination() {
        //! Castling is offered and accepted as king e1 to g1
        let mut engine =
            ShakmatyEngine::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
        let king_targets: Vec<Square> = engine.moves(sq("e1")).iter().map(|m| m.to).collect();
        assert!(king_targets.contains(&sq("g1")));
        assert!(king_targets.contains(&sq("c1")));

        let record = engine.apply_move(sq("e1"), sq("g1"), None).unwrap();
        assert!(record.is_castling);
        assert_eq!(record.san, "O-O");
        assert_eq!(
            engine.piece_at(sq("f1")),
            Some(PieceInfo::new(PieceKind::Rook, PieceColor::White))
        );
    }

    #[test]
    fn test_promotion_defaults_to_queen() {
        let mut engine = ShakmatyEngine::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        let record = engine.apply_move(sq("e7"), sq("e8"), None).unwrap();
        assert_eq!(record.promotion, Some(PieceKind::Queen));
        assert_eq!(
            engine.piece_at(sq("e8")),
            Some(PieceInfo::new(PieceKind::Queen, PieceColor::White))
        );
    }

    #[test]
    fn test_promotion_choice_respected() {
        let mut engine = ShakmatyEngine::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        let record = engine
            .apply_move(sq("e7"), sq("e8"), Some(PieceKind::Knight))
            .unwrap();
        assert_eq!(record.promotion, Some(PieceKind::Knight));
    }

    #[test]
    fn test_checkmate_detection() {
        //! Fool's mate
        let mut engine = ShakmatyEngine::default();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            engine.apply_move(sq(from), sq(to), None).unwrap();
        }
        assert!(engine.is_checkmate());
        assert!(engine.in_check());
        assert!(!engine.is_stalemate());
    }

    #[test]
    fn test_stalemate_detection() {
        let engine = ShakmatyEngine::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(engine.is_stalemate());
        assert!(engine.is_draw());
        assert!(!engine.is_checkmate());
    }

    #[test]
    fn test_insufficient_material_is_draw() {
        let engine = ShakmatyEngine::from_fen("8/8/8/4k3/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(engine.is_draw());
        assert!(!engine.is_stalemate());
    }

    #[test]
    fn test_fifty_move_rule_is_draw() {
        let engine = ShakmatyEngine::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 100 80").unwrap();
        assert!(engine.is_draw());
    }

    #[test]
    fn test_threefold_repetition_is_draw() {
        //! Knights shuffling out and back twice repeat the start position three times
        let mut engine = ShakmatyEngine::default();
        for _ in 0..2 {
            for (from, to) in [("g1", "f3"), ("g8", "f6"), ("f3", "g1"), ("f6", "g8")] {
                assert!(!engine.is_draw());
                engine.apply_move(sq(from), sq(to), None).unwrap();
            }
        }
        assert!(engine.is_draw());

        engine.undo();
        assert!(!engine.is_draw());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut engine = ShakmatyEngine::default();
        let err = engine.load("not a position").unwrap_err();
        assert!(!err.is_recoverable());
        assert!(matches!(err, EngineError::InvalidPosition { .. }));
    }

    #[test]
    fn test_load_rejects_impossible_position() {
        //! Parses as FEN but has no kings
        let err = ShakmatyEngine::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").unwrap_err();
        assert!(matches!(err, EngineError::InvalidPosition { .. }));
    }
}
