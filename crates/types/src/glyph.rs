//! Reserved glyph and character ids (code page 437 positions).

/// Empty glyph. Only the cell background is drawn.
pub const NONE: u32 = 0;
/// Blank glyph. Only the cell background is drawn.
pub const SPACE: u32 = 32;

/// Text-mode blank character. Only the half-cell background is drawn.
pub const TEXT_SPACE: u32 = 32;

pub const BORDER_UD: u32 = 179;
pub const BORDER_DL: u32 = 191;
pub const BORDER_UR: u32 = 192;
pub const BORDER_LR: u32 = 196;
pub const BORDER_UL: u32 = 217;
pub const BORDER_DR: u32 = 218;

pub const SHADE_LIGHT: u32 = 176;
pub const SHADE_MEDIUM: u32 = 177;
pub const SHADE_DARK: u32 = 178;
pub const BLOCK: u32 = 219;
pub const DOT: u32 = 250;
pub const AT: u32 = 64;

/// True for the glyph ids that suppress the foreground blit.
#[inline]
pub fn is_blank_glyph(id: u32) -> bool {
    id == NONE || id == SPACE
}

/// True for the text character ids that suppress the foreground blit.
#[inline]
pub fn is_blank_char(id: u32) -> bool {
    id == TEXT_SPACE
}
