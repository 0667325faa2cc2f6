use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Color;

/// Errors that can occur while loading editor configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Editor settings. Missing keys fall back to their defaults so older
/// config files keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas_width: i32,
    pub canvas_height: i32,
    /// Background of the committed canvas
    pub canvas_color: Color,
    /// Background of the pending-edit overlay
    pub overlay_color: Color,
    pub default_thickness: i32,
    pub default_text_size: i32,
    /// Half-width of the square in which a control handle can be grabbed
    pub control_size: i32,
    /// Name the editor state is saved under
    pub save_key: String,
    /// Directory for file-backed saves
    pub state_dir: PathBuf,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 5000,
            canvas_height: 5000,
            canvas_color: Color::WHITE,
            overlay_color: Color::CLEAR,
            default_thickness: 1,
            default_text_size: 12,
            control_size: 15,
            save_key: "save".to_string(),
            state_dir: PathBuf::from("state"),
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from `path`, or use the defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
