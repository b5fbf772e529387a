//! Chess game resources - shared game state management
//!
//! # Resource Categories
//!
//! ## Rules
//! - [`RulesEngine`] - Capability surface of the chess rules engine
//! - [`ShakmatyEngine`] - Production engine
//!
//! ## Player Interaction
//! - [`Selection`] - Currently selected square and its legal moves
//!
//! ## Game History
//! - [`MoveHistory`] - Moves played since the last reset, for undo and display
//! - [`CapturedPieces`] - Material derived from the history
//!
//! ## Game Status
//! - [`GameStatus`] - Playing / check / checkmate / stalemate / draw
//!
//! ## Shared State
//! - [`GameStore`] - Mutex-guarded [`GameState`] combining all of the above
//!
//! Only [`GameStore`] is meant to be shared. The other resources live inside
//! its state and are exposed read-only through [`GameStore::read`] and
//! [`GameStore::snapshot`].

pub mod captured;
pub mod engine;
pub mod history;
pub mod selection;
pub mod status;
pub mod store;

pub use captured::*;
pub use engine::*;
pub use history::*;
pub use selection::*;
pub use status::*;
pub use store::*;
