//! Game store - the single shared, mutable game state
//!
//! [`GameStore`] owns the rules engine together with everything derived from it:
//! selection, legal-move cache, move history, status, active color and position
//! key. Every action takes the lock once, mutates, resyncs the derived fields and
//! releases it, so readers only ever observe fully settled states.
//!
//! # Actions
//!
//! | Action | Effect |
//! |---|---|
//! | [`GameStore::select_square`] | select / deselect / move-to-target |
//! | [`GameStore::make_move`] | apply a move, `false` when illegal |
//! | [`GameStore::undo_move`] | take back the last move, no-op on empty history |
//! | [`GameStore::reset_game`] | fresh engine, empty history |
//! | [`GameStore::load_position`] | seed the engine from a FEN |
//! | [`GameStore::recompute_status`] | re-derive status from the engine |
//!
//! # Engine faults
//!
//! An engine error other than an illegal move means the engine instance can no
//! longer be trusted. The store logs it, records it in
//! [`GameSnapshot::engine_fault`] and rebuilds everything from a fresh engine.

use crate::board::{all_squares, Square};
use crate::core::error::{EngineError, GameError, GameResult};
use crate::core::resources::InteractionSettings;
use crate::game::resources::captured::CapturedPieces;
use crate::game::resources::engine::{RulesEngine, ShakmatyEngine};
use crate::game::resources::history::MoveHistory;
use crate::game::resources::selection::Selection;
use crate::game::resources::status::GameStatus;
use crate::game::types::{MoveRecord, PieceColor, PieceInfo, PieceKind};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, trace};

/// Everything guarded by the store's lock
///
/// `active_color`, `position_key` and `status` are caches of the engine and are
/// rewritten by [`GameState::resync`] after every engine mutation.
#[derive(Debug)]
pub struct GameState<E: RulesEngine = ShakmatyEngine> {
    engine: E,
    selection: Selection,
    history: MoveHistory,
    status: GameStatus,
    active_color: PieceColor,
    position_key: String,
    engine_fault: Option<String>,
    settings: InteractionSettings,
}

impl<E: RulesEngine + Default> GameState<E> {
    fn new(settings: InteractionSettings) -> Self {
        let (engine, fault) = Self::fresh_engine(&settings);
        let mut state = Self {
            engine,
            selection: Selection::default(),
            history: MoveHistory::default(),
            status: GameStatus::Playing,
            active_color: PieceColor::White,
            position_key: String::new(),
            engine_fault: fault,
            settings,
        };
        state.resync();
        state
    }

    /// Default engine seeded with the configured starting position
    ///
    /// A starting position the engine refuses is itself a fault; the plain
    /// default position is used instead.
    fn fresh_engine(settings: &InteractionSettings) -> (E, Option<String>) {
        let mut engine = E::default();
        if let Some(fen) = &settings.starting_fen {
            if let Err(e) = engine.load(fen) {
                error!("[STORE] Configured starting position rejected: {}", e);
                return (E::default(), Some(e.to_string()));
            }
        }
        (engine, None)
    }

    /// Mirror the engine into the cached fields
    fn resync(&mut self) {
        self.active_color = self.engine.turn();
        self.position_key = self.engine.fen();
        self.recompute_status();
    }

    fn recompute_status(&mut self) {
        self.status = GameStatus::derive(&self.engine);
    }

    fn reset_game(&mut self) {
        let (engine, fault) = Self::fresh_engine(&self.settings);
        self.engine = engine;
        if fault.is_some() {
            self.engine_fault = fault;
        }
        self.selection.clear();
        self.history.clear();
        self.resync();
    }

    /// Record an unrecoverable engine error and reinitialize
    fn engine_failed(&mut self, action: &str, err: &EngineError) -> String {
        let message = format!("{action}: {err}");
        error!("[STORE] Engine fault during {}. Resetting game.", message);
        self.engine_fault = Some(message.clone());
        self.reset_game();
        message
    }

    fn select_square(&mut self, square: Square) {
        if self.selection.selected_square() == Some(square) {
            debug!("[STORE] Deselected {}", square);
            self.selection.clear();
        } else if self.is_own_piece(square) {
            let moves = self.engine.moves(square);
            debug!("[STORE] Selected {} ({} legal moves)", square, moves.len());
            self.selection.select(square, moves);
        } else if let Some(from) = self.selection.selected_square() {
            if !self.make_move(from, square, None) {
                debug!("[STORE] Ignored click on {} with {} selected", square, from);
            }
        } else {
            trace!("[STORE] Ignored click on {} with nothing selected", square);
        }
    }

    fn make_move(&mut self, from: Square, to: Square, promotion: Option<PieceKind>) -> bool {
        let promotion = promotion.unwrap_or(self.settings.default_promotion);
        match self.engine.apply_move(from, to, Some(promotion)) {
            Ok(record) => {
                debug!("[STORE] Move {}: {}", self.history.len() + 1, record.san);
                self.history.add_move(record);
                self.selection.clear();
                self.resync();
                true
            }
            Err(EngineError::IllegalMove { .. }) => {
                debug!("[STORE] Illegal move {}-{}", from, to);
                false
            }
            Err(e) => {
                self.engine_failed("make_move", &e);
                false
            }
        }
    }

    fn undo_move(&mut self) -> bool {
        if self.history.is_empty() {
            trace!("[STORE] Nothing to undo");
            return false;
        }
        match self.engine.undo() {
            Some(record) => {
                self.history.pop();
                info!("[STORE] Undid {}", record.san);
                self.selection.clear();
                self.resync();
                true
            }
            None => {
                let err = EngineError::Corrupted(format!(
                    "engine has no move to undo but history holds {}",
                    self.history.len()
                ));
                self.engine_failed("undo_move", &err);
                false
            }
        }
    }

    fn load_position(&mut self, fen: &str) -> GameResult<()> {
        if let Err(e) = self.engine.load(fen) {
            let message = self.engine_failed("load_position", &e);
            return Err(GameError::EngineFault(message));
        }
        info!("[STORE] Loaded position {}", fen);
        self.selection.clear();
        self.history.clear();
        self.resync();
        Ok(())
    }

    fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            selected_square: self.selection.selected_square(),
            legal_moves: self.selection.legal_moves().to_vec(),
            highlighted_squares: self.selection.highlighted_squares(),
            history: self.history.moves().to_vec(),
            status: self.status,
            status_message: self.status.message(self.active_color),
            active_color: self.active_color,
            position_key: self.position_key.clone(),
            move_number: self.history.move_number(),
            last_move: self.history.last_move_label(),
            engine_fault: self.engine_fault.clone(),
        }
    }
}

impl<E: RulesEngine> GameState<E> {
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn active_color(&self) -> PieceColor {
        self.active_color
    }

    pub fn position_key(&self) -> &str {
        &self.position_key
    }

    pub fn engine_fault(&self) -> Option<&str> {
        self.engine_fault.as_deref()
    }

    pub fn settings(&self) -> &InteractionSettings {
        &self.settings
    }

    /// Occupant of `square` in the current position
    pub fn piece_at(&self, square: Square) -> Option<PieceInfo> {
        self.engine.piece_at(square)
    }

    /// Whether `square` holds a piece of the side to move
    pub fn is_own_piece(&self, square: Square) -> bool {
        self.engine
            .piece_at(square)
            .is_some_and(|piece| piece.color == self.active_color)
    }
}

/// Read-only view of the store handed to the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub selected_square: Option<Square>,
    pub legal_moves: Vec<MoveRecord>,
    pub highlighted_squares: Vec<Square>,
    pub history: Vec<MoveRecord>,
    pub status: GameStatus,
    pub status_message: String,
    pub active_color: PieceColor,
    pub position_key: String,
    pub move_number: usize,
    pub last_move: Option<String>,
    /// Last unrecoverable engine error, until acknowledged
    pub engine_fault: Option<String>,
}

/// Mutex-guarded game state shared by the controllers
///
/// Construct one per game and share it behind an `Arc`.
#[derive(Debug)]
pub struct GameStore<E: RulesEngine = ShakmatyEngine> {
    state: Mutex<GameState<E>>,
}

impl GameStore {
    /// Store backed by [`ShakmatyEngine`] with default settings
    pub fn new() -> Self {
        Self::from_settings(InteractionSettings::default())
    }

    /// Store backed by [`ShakmatyEngine`]
    pub fn with_settings(settings: InteractionSettings) -> Self {
        Self::from_settings(settings)
    }
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: RulesEngine + Default> GameStore<E> {
    /// Store backed by any rules engine
    pub fn from_settings(settings: InteractionSettings) -> Self {
        info!("[STORE] New game store");
        Self {
            state: Mutex::new(GameState::new(settings)),
        }
    }

    /// Run `f` against a consistent view of the state
    pub fn read<R>(&self, f: impl FnOnce(&GameState<E>) -> R) -> R {
        let state = self.state.lock();
        f(&*state)
    }

    /// Click semantics: deselect, select an own piece, or move to the target
    pub fn select_square(&self, square: Square) {
        self.state.lock().select_square(square);
    }

    /// Pick the square to select from the current state, then select it
    ///
    /// Decision and selection happen under one lock. Returns the square that
    /// was passed to [`GameStore::select_square`], if any.
    pub fn select_square_where(
        &self,
        pick: impl FnOnce(&GameState<E>) -> Option<Square>,
    ) -> Option<Square> {
        let mut state = self.state.lock();
        let square = pick(&*state)?;
        state.select_square(square);
        Some(square)
    }

    /// Apply `from`-`to` with the configured default promotion
    ///
    /// Returns `false` for illegal moves, leaving the state unchanged.
    pub fn make_move(&self, from: Square, to: Square) -> bool {
        self.state.lock().make_move(from, to, None)
    }

    /// Apply `from`-`to`, promoting to `promotion` when given
    pub fn make_move_with_promotion(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> bool {
        self.state.lock().make_move(from, to, promotion)
    }

    /// Take back the last move; `false` when the history is empty
    pub fn undo_move(&self) -> bool {
        self.state.lock().undo_move()
    }

    pub fn reset_game(&self) {
        info!("[STORE] Resetting game");
        self.state.lock().reset_game();
    }

    pub fn recompute_status(&self) {
        self.state.lock().recompute_status();
    }

    /// Replace the position with `fen`, clearing history and selection
    ///
    /// A rejected position is an engine fault: the game is reset and the
    /// error returned.
    pub fn load_position(&self, fen: &str) -> GameResult<()> {
        self.state.lock().load_position(fen)
    }

    /// Undo is offered while there is history and the game is still running
    pub fn can_undo(&self) -> bool {
        self.read(|state| state.history.can_undo() && !state.status.is_game_over())
    }

    /// Whether `square` holds a piece of the side to move
    pub fn can_select(&self, square: Square) -> bool {
        self.read(|state| state.is_own_piece(square))
    }

    pub fn piece_at(&self, square: Square) -> Option<PieceInfo> {
        self.read(|state| state.engine.piece_at(square))
    }

    /// Every occupied square in board order
    pub fn pieces(&self) -> Vec<(Square, PieceInfo)> {
        self.read(|state| {
            all_squares()
                .into_iter()
                .filter_map(|square| state.engine.piece_at(square).map(|piece| (square, piece)))
                .collect()
        })
    }

    pub fn selected_square(&self) -> Option<Square> {
        self.read(|state| state.selection.selected_square())
    }

    pub fn legal_moves(&self) -> Vec<MoveRecord> {
        self.read(|state| state.selection.legal_moves().to_vec())
    }

    pub fn highlighted_squares(&self) -> Vec<Square> {
        self.read(|state| state.selection.highlighted_squares())
    }

    pub fn history(&self) -> Vec<MoveRecord> {
        self.read(|state| state.history.moves().to_vec())
    }

    pub fn captured_pieces(&self) -> CapturedPieces {
        self.read(|state| CapturedPieces::from_history(&state.history))
    }

    pub fn status(&self) -> GameStatus {
        self.read(|state| state.status)
    }

    pub fn active_color(&self) -> PieceColor {
        self.read(|state| state.active_color)
    }

    pub fn position_key(&self) -> String {
        self.read(|state| state.position_key.clone())
    }

    pub fn settings(&self) -> InteractionSettings {
        self.read(|state| state.settings.clone())
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.read(|state| state.snapshot())
    }

    /// Clear and return the recorded engine fault
    pub fn acknowledge_fault(&self) -> Option<String> {
        self.state.lock().engine_fault.take()
    }
}
