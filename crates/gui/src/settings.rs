//! Optional settings file (`hotseat.toml`)
//!
//! A missing file means defaults; a malformed file logs a warning and
//! falls back to defaults. Settings never abort startup.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

pub const SETTINGS_FILE: &str = "hotseat.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial window size in logical pixels
    pub window_width: f32,
    pub window_height: f32,
    /// Dark or light application theme
    pub dark_theme: bool,
    /// Start with Black at the bottom of the board
    pub flip_board: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: 1100.0,
            window_height: 760.0,
            dark_theme: true,
            flip_board: false,
        }
    }
}

impl Settings {
    /// Load settings from the working directory, falling back to defaults.
    pub fn load() -> Self {
        match Self::read(Path::new(SETTINGS_FILE)) {
            Ok(Some(settings)) => settings,
            Ok(None) => Settings::default(),
            Err(err) => {
                warn!("failed to load {SETTINGS_FILE}: {err:#}");
                Settings::default()
            }
        }
    }

    fn read(path: &Path) -> anyhow::Result<Option<Settings>> {
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let settings = toml::from_str(&raw).context("parsing settings")?;
        Ok(Some(settings))
    }
}
