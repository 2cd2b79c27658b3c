use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{i18n::Language, timer::notifier::NotificationPermission};

pub const SETTINGS_FILE: &str = "settings.json";

/// User settings kept in `settings.json` in the application directory. Every field has a
/// default, so a partial file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub focus_minutes: u32,
    pub break_minutes: u32,
    pub language: Language,
    pub notifications: NotificationPermission,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            focus_minutes: 25,
            break_minutes: 5,
            language: Language::En,
            notifications: NotificationPermission::Default,
        }
    }
}

impl Settings {
    pub fn path(app_dir: &Path) -> PathBuf {
        app_dir.join(SETTINGS_FILE)
    }

    /// Loads settings, falling back to defaults when the file is missing or can't be parsed.
    pub fn load(app_dir: &Path) -> Self {
        let path = Self::path(app_dir);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                warn!("Failed to read {path:?}: {e}");
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&content) {
            Ok(settings) => {
                info!("Loaded settings from {path:?}");
                settings
            }
            Err(e) => {
                warn!("Failed to parse {path:?}, using defaults: {e}");
                Self::default()
            }
        }
    }
}
