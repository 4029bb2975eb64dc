// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and
//! saving user preferences to a `settings.toml` file.

pub mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "ModelLens";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Viewer background color as a hex string (`#rrggbb`).
    pub background_color: Option<String>,
    /// Preview overlay fade duration in milliseconds.
    #[serde(default)]
    pub preview_fade_ms: Option<u64>,
    /// Default models directory when none is given on the command line.
    #[serde(default)]
    pub models_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            background_color: Some(DEFAULT_BACKGROUND_COLOR.to_string()),
            preview_fade_ms: Some(DEFAULT_PREVIEW_FADE_MS),
            models_dir: None,
        }
    }
}

fn default_config_path(override_dir: Option<&str>) -> Option<PathBuf> {
    if let Some(dir) = override_dir {
        return Some(Path::new(dir).join(CONFIG_FILE));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load(override_dir: Option<&str>) -> Result<Config> {
    if let Some(path) = default_config_path(override_dir) {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config, override_dir: Option<&str>) -> Result<()> {
    if let Some(path) = default_config_path(override_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("failed to serialize settings: {e}")))?;
    fs::write(path, content)?;
    Ok(())
}

/// Parses a `#rrggbb` hex string into an Iced color.
///
/// Malformed input falls back to the default background so a hand-edited
/// settings file can never break startup.
pub fn parse_background_color(value: Option<&str>) -> iced::Color {
    let raw = value.unwrap_or(DEFAULT_BACKGROUND_COLOR);
    parse_hex_color(raw).unwrap_or_else(|| {
        tracing::warn!(color = raw, "invalid background color, using default");
        parse_hex_color(DEFAULT_BACKGROUND_COLOR).unwrap_or(iced::Color::BLACK)
    })
}

fn parse_hex_color(raw: &str) -> Option<iced::Color> {
    let hex = raw.strip_prefix('#')?;
    // Both checks are needed: length alone would let a multibyte string
    // through and the byte-index slices below would panic on it.
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(iced::Color::from_rgb8(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            background_color: Some("#112233".to_string()),
            preview_fade_ms: Some(450),
            models_dir: Some("/srv/models".to_string()),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded.background_color, config.background_color);
        assert_eq!(loaded.preview_fade_ms, config.preview_fade_ms);
        assert_eq!(loaded.models_dir, config.models_dir);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded.background_color, Config::default().background_color);
    }

    #[test]
    fn parse_background_color_reads_hex() {
        let color = parse_background_color(Some("#ff0080"));
        assert!((color.r - 1.0).abs() < f32::EPSILON);
        assert!(color.g.abs() < f32::EPSILON);
        assert!((color.b - 128.0 / 255.0).abs() < 0.01);
    }

    #[test]
    fn parse_background_color_falls_back_on_garbage() {
        let default = parse_background_color(None);
        // "#€abc" is six bytes after the '#' but not six hex digits;
        // slicing it by byte index would split the multibyte character.
        for raw in ["not-a-color", "#€abc", "#12345", "#1234567", "#gggggg"] {
            assert_eq!(parse_background_color(Some(raw)), default);
        }
    }
}
