//! Interaction core for a 3D chessboard
//!
//! - [`board`] - square identifiers and the board-to-3D coordinate transform
//! - [`game`] - rules engine integration and the shared [`game::resources::GameStore`]
//! - [`input`] - click selection and drag-and-drop controllers
//! - [`core`] - errors and settings

pub mod board;
pub mod core;
pub mod game;
pub mod input;
