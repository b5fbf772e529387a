//! Core module - application infrastructure shared by every layer
//!
//! # Contents
//!
//! - `error` - [`CoreError`], [`GameError`], [`EngineError`] and their `Result` aliases
//! - `resources` - [`InteractionSettings`], the user-tunable interaction behavior
//! - `settings_persistence` - JSON load/save of the settings in the platform config dir
//!
//! # Usage Example
//!
//! ```rust,ignore
//! use board3d_chess::core::{load_settings, settings_path};
//! use board3d_chess::game::resources::GameStore;
//!
//! let settings = load_settings(&settings_path());
//! let store = GameStore::with_settings(settings);
//! ```

pub mod error;
pub mod resources;
pub mod settings_persistence;

// Re-export commonly used items
pub use error::*;
pub use resources::*;
pub use settings_persistence::*;
