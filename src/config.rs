//! Settings document persistence

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error writing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The five theme colors. Always written, always taken from the current invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub background: String,
    pub primary: String,
    pub secondary: String,
    pub text: String,
    pub accent: String,
}

/// Optional UI preferences.
///
/// Values are kept as raw JSON so that whatever an earlier run stored survives
/// unchanged, including its type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_wallpaper: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_preset: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar_position: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar_visible: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_enabled: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_sounds_enabled: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rounding: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_hidden_files: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presets: Option<Value>,
}

impl Preferences {
    /// Copy every known preference key out of a previously stored document.
    pub fn carried_from(prior: &Map<String, Value>) -> Self {
        let take = |key: &str| prior.get(key).cloned();
        Preferences {
            last_wallpaper: take("lastWallpaper"),
            color_preset: take("colorPreset"),
            sidebar_position: take("sidebarPosition"),
            sidebar_visible: take("sidebarVisible"),
            notifications_enabled: take("notificationsEnabled"),
            notification_sounds_enabled: take("notificationSoundsEnabled"),
            rounding: take("rounding"),
            show_hidden_files: take("showHiddenFiles"),
            presets: take("presets"),
        }
    }
}

/// What ends up on disk: colors first, then whichever preferences are set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsDocument {
    #[serde(flatten)]
    pub palette: Palette,
    #[serde(flatten)]
    pub preferences: Preferences,
}

/// Read the document currently stored at `path`.
///
/// A missing file, unreadable file, invalid JSON or a non-object top level all
/// yield an empty map.
pub fn load_existing(path: &Path) -> Map<String, Value> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!("no prior settings at {}: {}", path.display(), e);
            return Map::new();
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            debug!("prior settings at {} are not a JSON object", path.display());
            Map::new()
        }
        Err(e) => {
            debug!("ignoring unparsable settings at {}: {}", path.display(), e);
            Map::new()
        }
    }
}

pub fn save_document(path: &Path, document: &SettingsDocument) -> Result<(), SettingsError> {
    let io_err = |source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    };

    // Create parent directory if it doesn't exist
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let content = serde_json::to_string_pretty(document)?;
    fs::write(path, content).map_err(io_err)?;
    Ok(())
}
