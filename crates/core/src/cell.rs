//! The atomic drawable unit of a canvas or view grid.

use tile_canvas_types::{glyph, Colour};

/// What a cell shows: one full-width glyph, or two half-width text characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content {
    Glyph(u32),
    Text([u32; 2]),
}

impl Content {
    /// The blank content for this mode.
    pub fn blank(self) -> Content {
        match self {
            Content::Glyph(_) => Content::Glyph(glyph::NONE),
            Content::Text(_) => Content::Text([glyph::TEXT_SPACE; 2]),
        }
    }
}

/// One grid position's rendering state.
///
/// Every setter compares against the current value; only an actual change
/// marks the cell dirty, so repeated identical writes cost nothing at render
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    content: Content,
    fore: Colour,
    back: Colour,
    z: i32,
    dirty: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            content: Content::Glyph(glyph::NONE),
            fore: Colour::BLACK,
            back: Colour::BLACK,
            z: 0,
            dirty: false,
        }
    }
}

impl Cell {
    pub fn content(&self) -> Content {
        self.content
    }

    pub fn glyph(&self) -> Option<u32> {
        match self.content {
            Content::Glyph(g) => Some(g),
            Content::Text(_) => None,
        }
    }

    pub fn chars(&self) -> Option<[u32; 2]> {
        match self.content {
            Content::Text(chars) => Some(chars),
            Content::Glyph(_) => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.content, Content::Text(_))
    }

    pub fn fore(&self) -> Colour {
        self.fore
    }

    pub fn back(&self) -> Colour {
        self.back
    }

    pub fn z(&self) -> i32 {
        self.z
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Marks the cell as flushed to the backend.
    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Sets every attribute at once, switching to glyph mode if needed.
    pub fn set_glyph(&mut self, glyph: u32, fore: Colour, back: Colour, z: i32) {
        self.set(Content::Glyph(glyph), fore, back, z);
    }

    /// Sets every attribute at once, switching to text mode if needed.
    pub fn set_text(&mut self, left: u32, right: u32, fore: Colour, back: Colour, z: i32) {
        self.set(Content::Text([left, right]), fore, back, z);
    }

    /// Replaces one half of a text cell. `side` is taken mod 2 (0 = left).
    ///
    /// A glyph cell is switched to text mode with the other half blank.
    pub fn set_char(&mut self, ch: u32, side: usize, z: i32) {
        let mut chars = self.chars().unwrap_or([glyph::TEXT_SPACE; 2]);
        chars[side % 2] = ch;
        self.set(Content::Text(chars), self.fore, self.back, z);
    }

    /// Changes colours and z, keeping the current content.
    pub fn set_colours(&mut self, fore: Colour, back: Colour, z: i32) {
        self.set(self.content, fore, back, z);
    }

    /// Resets to the blank state of the current mode with black colours and z=0.
    pub fn clear(&mut self) {
        self.set(self.content.blank(), Colour::BLACK, Colour::BLACK, 0);
    }

    fn set(&mut self, content: Content, fore: Colour, back: Colour, z: i32) {
        if self.content != content || self.fore != fore || self.back != back || self.z != z {
            self.content = content;
            self.fore = fore;
            self.back = back;
            self.z = z;
            self.dirty = true;
        }
    }
}
