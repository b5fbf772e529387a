//! Rules engine integration
//!
//! - `rules` - the [`RulesEngine`] capability surface the store depends on
//! - `engine` - [`ShakmatyEngine`], the production implementation

pub mod engine;
pub mod rules;

// Re-export all public items
pub use engine::*;
pub use rules::*;
