//! Derived game status
//!
//! [`GameStatus`] is never set directly. The store calls [`GameStatus::derive`]
//! at the end of every mutating action, so it always describes the engine's
//! current position.
//!
//! # Priority
//!
//! ```text
//! Checkmate > Stalemate > Draw > Check > Playing
//! ```
//!
//! Stalemate is also a draw; it is reported as `Stalemate` because it ranks
//! higher.

use crate::game::resources::engine::RulesEngine;
use crate::game::types::PieceColor;
use serde::{Deserialize, Serialize};

/// Outcome of the position for the side to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Playing,
    Check,
    Checkmate,
    Stalemate,
    Draw,
}

impl GameStatus {
    /// Query the engine in priority order
    pub fn derive<E: RulesEngine + ?Sized>(engine: &E) -> Self {
        if engine.is_checkmate() {
            GameStatus::Checkmate
        } else if engine.is_stalemate() {
            GameStatus::Stalemate
        } else if engine.is_draw() {
            GameStatus::Draw
        } else if engine.in_check() {
            GameStatus::Check
        } else {
            GameStatus::Playing
        }
    }

    /// Whether the game has ended (no further moves accepted)
    pub fn is_game_over(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate | GameStatus::Stalemate | GameStatus::Draw
        )
    }

    /// Winning side, `None` unless checkmate
    ///
    /// `active_color` is the side to move, which is the side that got mated.
    pub fn winner(self, active_color: PieceColor) -> Option<PieceColor> {
        match self {
            GameStatus::Checkmate => Some(active_color.opponent()),
            _ => None,
        }
    }

    /// Status line shown to the players
    pub fn message(self, active_color: PieceColor) -> String {
        match self {
            GameStatus::Playing => format!("{}'s turn", active_color.name()),
            GameStatus::Check => format!("{} is in check!", active_color.name()),
            GameStatus::Checkmate => {
                format!("Checkmate! {} wins!", active_color.opponent().name())
            }
            GameStatus::Stalemate => "Stalemate! The game is a draw.".to_string(),
            GameStatus::Draw => "Draw! The game has ended in a draw.".to_string(),
        }
    }
}
