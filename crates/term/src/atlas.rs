//! Character atlases: the terminal stand-in for glyph/font textures.
//!
//! An atlas file is UTF-8 text, one atlas row per line, every line holding
//! the same number of characters. Each atlas is [`ATLAS_WIDTH_PX`] pixels wide
//! regardless of its column count, so a 16-column glyph atlas has 2-pixel
//! tiles and a 32-column font atlas has 1-pixel tiles. One pixel is one
//! terminal column.

use std::path::Path;

use tile_canvas_core::types::Rect;
use tile_canvas_core::BackendError;

use crate::fb::Rgb;

pub const ATLAS_WIDTH_PX: u32 = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharAtlas {
    columns: u32,
    rows: u32,
    chars: Vec<char>,
    pub(crate) tint: Rgb,
}

impl CharAtlas {
    pub fn parse(text: &str) -> Result<Self, String> {
        let mut chars = Vec::new();
        let mut columns = 0;
        let mut rows = 0;

        for (n, line) in text.lines().enumerate() {
            let before = chars.len();
            chars.extend(line.chars());
            let len = (chars.len() - before) as u32;
            if n == 0 {
                columns = len;
            } else if len != columns {
                return Err(format!(
                    "row {n} has {len} entries, expected {columns}"
                ));
            }
            rows += 1;
        }

        if columns == 0 || ATLAS_WIDTH_PX % columns != 0 {
            return Err(format!(
                "{columns} columns do not divide the {ATLAS_WIDTH_PX}px atlas width"
            ));
        }

        Ok(Self {
            columns,
            rows,
            chars,
            tint: Rgb::new(255, 255, 255),
        })
    }

    pub fn load(path: &Path) -> Result<Self, BackendError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text).map_err(|reason| BackendError::Atlas {
            path: path.to_path_buf(),
            reason,
        })
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Size in pixels.
    pub fn size_px(&self) -> (u32, u32) {
        (ATLAS_WIDTH_PX, self.rows)
    }

    pub fn tile_width(&self) -> u32 {
        ATLAS_WIDTH_PX / self.columns
    }

    pub fn get(&self, col: u32, row: u32) -> Option<char> {
        if col >= self.columns || row >= self.rows {
            return None;
        }
        self.chars.get((row * self.columns + col) as usize).copied()
    }

    /// The entry whose tile starts at the top-left of `src`.
    pub fn lookup(&self, src: Rect) -> Option<char> {
        if src.x < 0 || src.y < 0 || src.h <= 0 {
            return None;
        }
        let col = src.x as u32 / self.tile_width();
        let row = (src.y / src.h) as u32;
        self.get(col, row)
    }
}

/// What fills the columns to the right of `ch` when it is drawn wider than
/// one terminal column, so lines and blocks stay connected.
pub fn extend_right(ch: char) -> char {
    match ch {
        '─' | '┌' | '└' | '├' | '┬' | '┴' | '┼' | '╓' | '╙' | '╟' | '╥' | '╨' | '╫' => '─',
        '═' | '╔' | '╚' | '╠' | '╦' | '╩' | '╬' | '╒' | '╘' | '╞' | '╤' | '╧' | '╪' => '═',
        '█' | '▀' | '▄' | '░' | '▒' | '▓' => ch,
        _ => ' ',
    }
}
