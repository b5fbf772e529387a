//! Interaction settings shared by the store and the controllers
//!
//! Loaded once at startup (see [`crate::core::settings_persistence`]) and
//! handed to [`crate::game::resources::GameStore`] and
//! [`crate::input::DragController`] at construction.

use crate::core::error::{CoreError, CoreResult};
use crate::game::types::PieceKind;
use serde::{Deserialize, Serialize};

/// User-tunable interaction behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Piece a pawn promotes to when the caller does not choose one
    pub default_promotion: PieceKind,

    /// Defer drag recomputation to the next frame flush
    pub coalesce_pointer_updates: bool,

    /// Position new games start from (FEN), standard start when unset
    pub starting_fen: Option<String>,

    /// Default tracing filter for the binary, overridden by `RUST_LOG`
    pub log_filter: String,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            default_promotion: PieceKind::Queen,
            coalesce_pointer_updates: true,
            starting_fen: None,
            log_filter: "info".to_string(),
        }
    }
}

impl InteractionSettings {
    /// Reject values no game could use
    pub fn validate(&self) -> CoreResult<()> {
        if !self.default_promotion.is_promotion_target() {
            return Err(CoreError::InvalidSetting {
                message: format!(
                    "default_promotion cannot be {}",
                    self.default_promotion.name()
                ),
            });
        }
        if let Some(fen) = &self.starting_fen {
            if fen.trim().is_empty() {
                return Err(CoreError::InvalidSetting {
                    message: "starting_fen is empty".to_string(),
                });
            }
        }
        if self.log_filter.trim().is_empty() {
            return Err(CoreError::InvalidSetting {
                message: "log_filter is empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = InteractionSettings::default();
        assert_eq!(settings.default_promotion, PieceKind::Queen);
        assert!(settings.coalesce_pointer_updates);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_king_promotion_rejected() {
        let settings = InteractionSettings {
            default_promotion: PieceKind::King,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(CoreError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        //! Older settings files without newer keys still load
        let settings: InteractionSettings =
            serde_json::from_str(r#"{ "default_promotion": "knight" }"#).unwrap();
        assert_eq!(settings.default_promotion, PieceKind::Knight);
        assert!(settings.coalesce_pointer_updates);
        assert_eq!(settings.log_filter, "info");
    }
}
