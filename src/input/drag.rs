//! Press-drag-release piece movement
//!
//! [`DragController`] runs a two-state machine:
//!
//! ```text
//! idle --start_drag(own piece)--> dragging --end_drag / reset_drag--> idle
//! ```
//!
//! The drag state lives here, not in the [`GameStore`]. The controller reads the
//! store for ownership and legal targets and writes to it only through
//! `select_square` (on start) and `make_move` (on a valid drop).
//!
//! # Pointer coalescing
//!
//! With `coalesce_pointer_updates` enabled, [`DragController::update_drag`] only
//! records the latest pointer position. [`DragController::flush_frame`] applies
//! it once per rendered frame. `end_drag` flushes first so the drop is judged on
//! the final pointer position.

use crate::board::{position_to_square, square_to_position, Position3D, Square};
use crate::game::resources::{GameStore, RulesEngine, ShakmatyEngine};
use crate::input::frame::FrameCoalescer;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, trace};

/// Live drag state, fully empty while idle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DragState {
    pub dragging: bool,
    /// Origin square of the dragged piece
    pub dragged_square: Option<Square>,
    /// Latest applied pointer position in board space
    pub pointer_position: Option<Position3D>,
    /// Grab offset from drag start
    pub pointer_offset: Option<Position3D>,
    /// Square under the pointer, `None` off the board
    pub hovered_square: Option<Square>,
}

/// Drop feedback for a square while dragging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DropStyle {
    ValidDrop,
    InvalidDrop,
    Normal,
}

#[derive(Debug)]
pub struct DragController<E: RulesEngine = ShakmatyEngine> {
    store: Arc<GameStore<E>>,
    state: DragState,
    pending: FrameCoalescer<Position3D>,
    coalesce: bool,
}

impl<E: RulesEngine + Default> DragController<E> {
    /// Controller using the store's `coalesce_pointer_updates` setting
    pub fn new(store: Arc<GameStore<E>>) -> Self {
        let coalesce = store.settings().coalesce_pointer_updates;
        Self::with_coalescing(store, coalesce)
    }

    pub fn with_coalescing(store: Arc<GameStore<E>>, coalesce: bool) -> Self {
        Self {
            store,
            state: DragState::default(),
            pending: FrameCoalescer::default(),
            coalesce,
        }
    }

    pub fn store(&self) -> &Arc<GameStore<E>> {
        &self.store
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.dragging
    }

    /// Begin dragging the piece on `square`
    ///
    /// Only pieces of the side to move can be picked up; anything else leaves
    /// the controller idle. The piece is selected in the store unless it already
    /// is, so highlighting follows the drag. Returns whether a drag started.
    pub fn start_drag(&mut self, square: Square, start: Position3D, offset: Position3D) -> bool {
        if self.state.dragging {
            debug!("[DRAG] New drag on {} replaces one in flight", square);
            self.reset_drag();
        }

        let mut owned = false;
        self.store.select_square_where(|state| {
            owned = state.is_own_piece(square);
            let already_selected = state.selection().selected_square() == Some(square);
            (owned && !already_selected).then_some(square)
        });

        if !owned {
            debug!("[DRAG] Cannot drag from {}", square);
            return false;
        }

        self.state = DragState {
            dragging: true,
            dragged_square: Some(square),
            pointer_position: Some(start),
            pointer_offset: Some(offset),
            hovered_square: None,
        };
        debug!("[DRAG] Started on {}", square);
        true
    }

    /// Record a pointer move
    ///
    /// Ignored while idle. Applied at the next [`DragController::flush_frame`]
    /// when coalescing, immediately otherwise.
    pub fn update_drag(&mut self, position: Position3D) {
        if !self.state.dragging {
            return;
        }
        if self.coalesce {
            self.pending.submit(position);
        } else {
            self.apply_pointer(position);
        }
    }

    /// Apply the pending pointer position; returns whether one was applied
    pub fn flush_frame(&mut self) -> bool {
        match self.pending.flush() {
            Some(position) if self.state.dragging => {
                trace!(
                    "[DRAG] Frame flush ({} pointer updates superseded so far)",
                    self.pending.superseded()
                );
                self.apply_pointer(position);
                true
            }
            _ => false,
        }
    }

    fn apply_pointer(&mut self, position: Position3D) {
        let hovered = position_to_square(position.on_board_plane());
        if hovered != self.state.hovered_square {
            trace!("[DRAG] Hovering {:?}", hovered);
        }
        self.state.pointer_position = Some(position);
        self.state.hovered_square = hovered;
    }

    /// Whether the dragged piece may legally land on `square`
    pub fn can_drop_on_square(&self, square: Square) -> bool {
        match self.state.dragged_square {
            Some(from) => self
                .store
                .read(|state| state.selection().allows(from, square)),
            None => false,
        }
    }

    pub fn is_valid_drop(&self) -> bool {
        self.state
            .hovered_square
            .is_some_and(|square| self.can_drop_on_square(square))
    }

    /// Release the piece
    ///
    /// Moves it when dropped on a legal target. Always returns to idle. Returns
    /// whether a move was made.
    pub fn end_drag(&mut self) -> bool {
        if !self.state.dragging {
            return false;
        }
        self.flush_frame();

        let executed = match (self.state.dragged_square, self.state.hovered_square) {
            (Some(from), Some(to)) if self.is_valid_drop() => self.store.make_move(from, to),
            _ => false,
        };

        debug!(
            "[DRAG] Released {:?} over {:?} (moved: {})",
            self.state.dragged_square, self.state.hovered_square, executed
        );
        self.reset_drag();
        executed
    }

    /// Cancel any drag, discarding in-flight pointer updates
    pub fn reset_drag(&mut self) {
        self.pending.cancel();
        self.state = DragState::default();
    }

    pub fn is_piece_dragging(&self, square: Square) -> bool {
        self.state.dragging && self.state.dragged_square == Some(square)
    }

    /// Where to draw the piece standing on `square`
    ///
    /// The live pointer position for the dragged piece, the square's resting
    /// position for everything else.
    pub fn get_dragged_piece_position(&self, square: Square) -> Position3D {
        match self.state.pointer_position {
            Some(position) if self.is_piece_dragging(square) => position,
            _ => square_to_position(square),
        }
    }

    pub fn get_hovered_square_style(&self, square: Square) -> DropStyle {
        if self.state.hovered_square != Some(square) {
            DropStyle::Normal
        } else if self.can_drop_on_square(square) {
            DropStyle::ValidDrop
        } else {
            DropStyle::InvalidDrop
        }
    }
}
