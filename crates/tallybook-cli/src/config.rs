use std::path::PathBuf;

use anyhow::{Context, Result};
use tallybook::AppSettings;

/// Local cache path: `<config_dir>/tallybook/settings.json`
pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tallybook").join("settings.json"))
}

/// Load the cached settings blob, falling back to defaults.
///
/// The blob is the same document kept at `data/settings.json` in the
/// repository; caching it locally lets a launch find its repository and
/// token without a round trip.
pub fn load_settings() -> AppSettings {
    if let Some(path) = settings_path()
        && let Ok(contents) = std::fs::read_to_string(&path)
    {
        if let Ok(settings) = serde_json::from_str(&contents) {
            return settings;
        }
        eprintln!(
            "warning: failed to parse settings at {}, using defaults",
            path.display()
        );
    }

    AppSettings::default()
}

/// Write the settings blob for the next launch.
pub fn store_settings(settings: &AppSettings) -> Result<()> {
    let path = settings_path().context("could not determine config directory")?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(settings).context("failed to encode settings")?;
    std::fs::write(&path, json)
        .with_context(|| format!("failed to write settings to {}", path.display()))
}
