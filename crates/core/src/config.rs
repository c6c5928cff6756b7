//! Canvas configuration.
//!
//! Loaded from a JSON file or from environment variables; every field falls
//! back to its default when absent.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `TILE_CANVAS_WIDTH` | `width` |
//! | `TILE_CANVAS_HEIGHT` | `height` |
//! | `TILE_CANVAS_GLYPHS` | `glyph_atlas` |
//! | `TILE_CANVAS_FONT` | `font_atlas` |
//! | `TILE_CANVAS_TITLE` | `title` |
//! | `TILE_CANVAS_FPS` | `framerate` |
//! | `TILE_CANVAS_LOG_PATH` | `log_path` |

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tile_canvas_types::Colour;

use crate::error::CanvasError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
    pub glyph_atlas: PathBuf,
    pub font_atlas: PathBuf,
    pub title: String,
    pub framerate: u32,
    pub border_focused: Colour,
    pub border_unfocused: Colour,
    pub log_path: Option<PathBuf>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 24,
            glyph_atlas: PathBuf::from("assets/glyphs.txt"),
            font_atlas: PathBuf::from("assets/font.txt"),
            title: "tile-canvas".to_string(),
            framerate: 60,
            border_focused: Colour(0xFFE2_8F00),
            border_unfocused: Colour(0xFF55_5555),
            log_path: None,
        }
    }
}

impl CanvasConfig {
    pub fn from_json_str(s: &str) -> Result<Self, CanvasError> {
        let config: Self = serde_json::from_str(s).map_err(|e| CanvasError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, CanvasError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CanvasError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Defaults overridden by any set and parsable `TILE_CANVAS_*` variable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            width: parsed("TILE_CANVAS_WIDTH")
                .filter(|&w: &u16| w > 0)
                .unwrap_or(defaults.width),
            height: parsed("TILE_CANVAS_HEIGHT")
                .filter(|&h: &u16| h > 0)
                .unwrap_or(defaults.height),
            glyph_atlas: non_empty("TILE_CANVAS_GLYPHS")
                .map(PathBuf::from)
                .unwrap_or(defaults.glyph_atlas),
            font_atlas: non_empty("TILE_CANVAS_FONT")
                .map(PathBuf::from)
                .unwrap_or(defaults.font_atlas),
            title: non_empty("TILE_CANVAS_TITLE").unwrap_or(defaults.title),
            framerate: parsed("TILE_CANVAS_FPS").unwrap_or(defaults.framerate),
            log_path: non_empty("TILE_CANVAS_LOG_PATH").map(PathBuf::from),
            ..defaults
        }
    }

    pub fn validate(&self) -> Result<(), CanvasError> {
        if self.width == 0 || self.height == 0 {
            return Err(CanvasError::Config(format!(
                "canvas must be at least 1x1 cells, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

fn non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = CanvasConfig::from_json_str(r#"{"width": 30, "title": "map"}"#).unwrap();
        assert_eq!(config.width, 30);
        assert_eq!(config.height, 24);
        assert_eq!(config.title, "map");
        assert_eq!(config.border_focused, Colour(0xFFE2_8F00));
    }

    #[test]
    fn zero_size_is_rejected() {
        let err = CanvasConfig::from_json_str(r#"{"height": 0}"#).unwrap_err();
        assert!(matches!(err, CanvasError::Config(_)));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            CanvasConfig::from_json_str("{width:").unwrap_err(),
            CanvasError::Config(_)
        ));
    }
}
