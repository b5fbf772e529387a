//! Chess game logic module
//!
//! Pure game state, with chess rules delegated to an engine behind the
//! [`resources::RulesEngine`] trait.
//!
//! # Module Organization
//!
//! - `types` - Piece and move records exchanged with the engine
//! - `resources` - Engine, selection, history, status and the shared [`resources::GameStore`]

pub mod resources;
pub mod types;
