//! Merge policy for settings updates
//!
//! Colors always come from the update. Preferences are carried over from the
//! stored document and replaced only where the update supplies a value.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::config::{self, Palette, Preferences, SettingsDocument, SettingsError};

/// Preference values supplied by the current invocation.
///
/// `None` and empty strings both mean "keep whatever is stored".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub last_wallpaper: Option<String>,
    pub color_preset: Option<String>,
    pub sidebar_position: Option<String>,
    pub notifications_enabled: Option<bool>,
    pub notification_sounds_enabled: Option<bool>,
    pub sidebar_visible: Option<bool>,
    pub rounding: Option<String>,
    pub show_hidden_files: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorUpdate {
    pub palette: Palette,
    pub overrides: Overrides,
}

fn set_text(slot: &mut Option<Value>, value: Option<&str>) {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        *slot = Some(Value::String(v.to_string()));
    }
}

fn set_flag(slot: &mut Option<Value>, value: Option<bool>) {
    if let Some(v) = value {
        *slot = Some(Value::Bool(v));
    }
}

impl Overrides {
    pub fn apply_to(&self, prefs: &mut Preferences) {
        set_text(&mut prefs.last_wallpaper, self.last_wallpaper.as_deref());
        set_text(&mut prefs.color_preset, self.color_preset.as_deref());
        set_text(&mut prefs.sidebar_position, self.sidebar_position.as_deref());
        set_flag(&mut prefs.notifications_enabled, self.notifications_enabled);
        set_flag(&mut prefs.notification_sounds_enabled, self.notification_sounds_enabled);
        set_flag(&mut prefs.sidebar_visible, self.sidebar_visible);
        set_text(&mut prefs.rounding, self.rounding.as_deref());
        set_flag(&mut prefs.show_hidden_files, self.show_hidden_files);
    }
}

/// Build the document to write from the stored one and the update.
pub fn merge(prior: &Map<String, Value>, update: &ColorUpdate) -> SettingsDocument {
    let mut preferences = Preferences::carried_from(prior);
    update.overrides.apply_to(&mut preferences);

    SettingsDocument {
        palette: update.palette.clone(),
        preferences,
    }
}

/// Load `path`, merge `update` into it and overwrite the file.
pub fn apply(path: &Path, update: &ColorUpdate) -> Result<SettingsDocument, SettingsError> {
    let prior = config::load_existing(path);
    debug!("loaded {} prior keys from {}", prior.len(), path.display());

    let document = merge(&prior, update);
    config::save_document(path, &document)?;

    info!("wrote settings to {}", path.display());
    Ok(document)
}
