//! Click-to-select / click-to-move controller
//!
//! [`SelectionController`] holds no state of its own. Every query is answered
//! from a single consistent read of the [`GameStore`], and every click is
//! forwarded to [`GameStore::select_square`].
//!
//! # Square status priority
//!
//! ```text
//! Selected > Highlighted > Selectable > Normal
//! ```

use crate::board::Square;
use crate::game::resources::{GameStore, RulesEngine, ShakmatyEngine};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, trace};

/// Display status of a square for selection feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SquareStatus {
    Selected,
    Highlighted,
    Selectable,
    Normal,
}

/// Projection of the store's selection plus click handling
#[derive(Debug)]
pub struct SelectionController<E: RulesEngine = ShakmatyEngine> {
    store: Arc<GameStore<E>>,
}

impl<E: RulesEngine> Clone for SelectionController<E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<E: RulesEngine + Default> SelectionController<E> {
    pub fn new(store: Arc<GameStore<E>>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<GameStore<E>> {
        &self.store
    }

    pub fn selected_square(&self) -> Option<Square> {
        self.store.selected_square()
    }

    /// Destinations of the selected piece's legal moves
    pub fn highlighted_squares(&self) -> Vec<Square> {
        self.store.highlighted_squares()
    }

    pub fn is_selected(&self, square: Square) -> bool {
        self.store
            .read(|state| state.selection().selected_square() == Some(square))
    }

    pub fn is_highlighted(&self, square: Square) -> bool {
        self.store.read(|state| state.selection().is_target(square))
    }

    /// Whether `square` holds a piece of the side to move
    pub fn can_select(&self, square: Square) -> bool {
        self.store.read(|state| state.is_own_piece(square))
    }

    pub fn square_status(&self, square: Square) -> SquareStatus {
        self.store.read(|state| {
            if state.selection().selected_square() == Some(square) {
                SquareStatus::Selected
            } else if state.selection().is_target(square) {
                SquareStatus::Highlighted
            } else if state.is_own_piece(square) {
                SquareStatus::Selectable
            } else {
                SquareStatus::Normal
            }
        })
    }

    /// Click on the board surface
    pub fn handle_square_click(&self, square: Square) {
        trace!("[SELECTION] Square click {}", square);
        self.store.select_square(square);
    }

    /// Click on a square identified by an untrusted string, ignored when malformed
    pub fn handle_square_click_str(&self, raw: &str) {
        match raw.parse::<Square>() {
            Ok(square) => self.handle_square_click(square),
            Err(e) => debug!("[SELECTION] Ignored click: {}", e),
        }
    }

    /// Click on a piece model
    ///
    /// Selects an own piece, or completes a move when the clicked piece stands
    /// on a highlighted square (a capture). Anything else is inert.
    pub fn handle_piece_click(&self, square: Square) {
        let forwarded = self.store.select_square_where(|state| {
            let selection = state.selection();
            let capture_target = selection.is_selected() && selection.is_target(square);
            (state.is_own_piece(square) || capture_target).then_some(square)
        });
        if forwarded.is_none() {
            debug!("[SELECTION] Ignored piece click on {}", square);
        }
    }

    /// Toggle off the current selection, no-op when nothing is selected
    pub fn clear_selection(&self) {
        self.store
            .select_square_where(|state| state.selection().selected_square());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn controller() -> SelectionController {
        SelectionController::new(Arc::new(GameStore::new()))
    }

    #[test]
    fn test_square_status_priority() {
        //! Selected overrides highlighted overrides selectable
        let selection = controller();
        selection.handle_square_click(sq("e2"));

        assert_eq!(selection.square_status(sq("e2")), SquareStatus::Selected);
        assert_eq!(selection.square_status(sq("e4")), SquareStatus::Highlighted);
        assert_eq!(selection.square_status(sq("d2")), SquareStatus::Selectable);
        assert_eq!(selection.square_status(sq("e7")), SquareStatus::Normal);
        assert_eq!(selection.square_status(sq("e5")), SquareStatus::Normal);
    }

    #[test]
    fn test_piece_click_on_opponent_without_selection_is_inert() {
        let selection = controller();
        selection.handle_piece_click(sq("e7"));
        assert_eq!(selection.selected_square(), None);
    }

    #[test]
    fn test_piece_click_captures_highlighted_piece() {
        let selection = controller();
        for square in ["e2", "e4", "d7", "d5"] {
            selection.handle_square_click(sq(square));
        }
        selection.handle_piece_click(sq("e4"));
        assert!(selection.is_highlighted(sq("d5")));

        selection.handle_piece_click(sq("d5"));

        let history = selection.store().history();
        assert_eq!(history.len(), 3);
        assert!(history[2].is_capture());
        assert_eq!(selection.selected_square(), None);
    }

    #[test]
    fn test_clear_selection() {
        let selection = controller();
        selection.clear_selection();
        assert_eq!(selection.selected_square(), None);

        selection.handle_square_click(sq("g1"));
        selection.clear_selection();
        assert_eq!(selection.selected_square(), None);
        assert!(selection.highlighted_squares().is_empty());
    }

    #[test]
    fn test_malformed_click_ignored() {
        let selection = controller();
        selection.handle_square_click_str("z9");
        selection.handle_square_click_str("e22");
        selection.handle_square_click_str("E2");
        selection.handle_square_click_str("");
        assert_eq!(selection.selected_square(), None);

        selection.handle_square_click_str("e2");
        assert!(selection.is_selected(sq("e2")));
    }
}
