//! Settings persistence
//!
//! Saves and loads [`InteractionSettings`] to/from a JSON file.
//!
//! # File Location
//!
//! `settings.json` in the user's configuration directory
//! (e.g. `~/.config/board3d/settings.json`), or the working directory when the
//! platform has none.
//!
//! # Error Handling
//!
//! - [`load_settings`] never fails: missing, unreadable, unparsable or invalid
//!   files fall back to defaults with a warning
//! - [`save_settings`] reports failures to the caller

use crate::core::error::CoreResult;
use crate::core::resources::InteractionSettings;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// Resolve the default settings file path
pub fn settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("org", "board3d", "board3d") {
        proj_dirs.config_dir().join(SETTINGS_FILENAME)
    } else {
        PathBuf::from(SETTINGS_FILENAME)
    }
}

/// Load settings from `path`, falling back to defaults
pub fn load_settings(path: &Path) -> InteractionSettings {
    if !path.exists() {
        info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
        return InteractionSettings::default();
    }

    match read_settings(path) {
        Ok(settings) => {
            info!("[SETTINGS] Loaded settings from {:?}", path);
            settings
        }
        Err(e) => {
            warn!(
                "[SETTINGS] Failed to load settings file at {:?}: {}. Using defaults.",
                path, e
            );
            InteractionSettings::default()
        }
    }
}

fn read_settings(path: &Path) -> CoreResult<InteractionSettings> {
    let contents = fs::read_to_string(path)?;
    let settings: InteractionSettings = serde_json::from_str(&contents)?;
    settings.validate()?;
    Ok(settings)
}

/// Save settings to `path`, creating its directory if needed
pub fn save_settings(path: &Path, settings: &InteractionSettings) -> CoreResult<()> {
    settings.validate()?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    info!("[SETTINGS] Saved settings to {:?}", path);
    Ok(())
}
