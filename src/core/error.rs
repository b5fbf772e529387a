//! Error types for the interaction core
//!
//! Three layers, three enums:
//!
//! - [`EngineError`] - produced by [`RulesEngine`](crate::game::resources::RulesEngine)
//!   implementations. `IllegalMove` is an expected outcome; everything else is fatal to
//!   the engine instance.
//! - [`GameError`] - what can leave the game store or a parsing boundary as a value.
//! - [`CoreError`] - settings persistence and validation.
//!
//! Illegal moves never become a [`GameError`]: store actions report them as `false`.

use thiserror::Error;

/// Errors raised by a rules engine implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The engine rejected a move attempt for the current position
    #[error("Illegal move {from}-{to}")]
    IllegalMove { from: String, to: String },

    /// A serialized position could not be parsed or describes an impossible board
    #[error("Invalid position '{fen}': {reason}")]
    InvalidPosition { fen: String, reason: String },

    /// Internal state is no longer trustworthy
    #[error("Engine state corrupted: {0}")]
    Corrupted(String),
}

impl EngineError {
    /// Whether this error leaves the engine usable
    ///
    /// Only illegal moves are recoverable; every other variant requires the
    /// engine to be replaced.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EngineError::IllegalMove { .. })
    }
}

/// Errors that can surface from the game store and coordinate parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Malformed square identifier at an input boundary
    #[error("Invalid square identifier '{0}'")]
    InvalidSquare(String),

    /// The rules engine failed and was reinitialized
    #[error("Rules engine fault: {0}")]
    EngineFault(String),
}

impl From<EngineError> for GameError {
    fn from(err: EngineError) -> Self {
        GameError::EngineFault(err.to_string())
    }
}

/// Result type alias for game store and coordinate operations
pub type GameResult<T> = Result<T, GameError>;

/// Result type alias for rules engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur in the core module
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings file I/O error
    #[error("Settings I/O error: {0}")]
    SettingsIo(#[from] std::io::Error),

    /// Settings serialization/deserialization error
    #[error("Settings serialization error: {0}")]
    SettingsSerialization(#[from] serde_json::Error),

    /// A setting holds a value the interaction core cannot use
    #[error("Invalid setting: {message}")]
    InvalidSetting { message: String },
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_move_is_recoverable() {
        let err = EngineError::IllegalMove {
            from: "e2".to_string(),
            to: "e5".to_string(),
        };
        assert!(err.is_recoverable());
        assert_eq!(err.to_string(), "Illegal move e2-e5");
    }

    #[test]
    fn test_faults_are_not_recoverable() {
        let invalid = EngineError::InvalidPosition {
            fen: "garbage".to_string(),
            reason: "bad board".to_string(),
        };
        assert!(!invalid.is_recoverable());
        assert!(!EngineError::Corrupted("stack underflow".to_string()).is_recoverable());
    }

    #[test]
    fn test_engine_error_converts_to_fault() {
        //! Any engine error crossing the store boundary is reported as a fault
        let err: GameError = EngineError::Corrupted("lost king".to_string()).into();
        assert_eq!(
            err,
            GameError::EngineFault("Engine state corrupted: lost king".to_string())
        );
    }
}
