//! Graphics backend collaborator.
//!
//! The canvas never talks to a window system directly. Everything it needs
//! from a backend is listed here: surfaces to compose into, atlas textures to
//! blit glyphs from, a clock, and a way to present the composed frame.
//!
//! All rectangles are in backend pixels. The render target is passed to each
//! draw call; `present` copies the composed surface to the visible window, so
//! a partially drawn frame is never shown.

use std::path::Path;

use tile_canvas_types::{Colour, Rect};

use crate::error::BackendError;

pub trait Backend {
    /// A glyph or font atlas.
    type Texture;
    /// An offscreen render target.
    type Surface;

    /// Creates (or re-creates) the visible window, `width` x `height` pixels.
    fn open_window(&mut self, title: &str, width: u32, height: u32) -> Result<(), BackendError>;

    fn resize_window(&mut self, width: u32, height: u32) -> Result<(), BackendError>;

    /// Releases the window and restores whatever the backend took over.
    fn close_window(&mut self) -> Result<(), BackendError>;

    fn create_surface(&mut self, width: u32, height: u32) -> Result<Self::Surface, BackendError>;

    fn load_texture(&mut self, path: &Path) -> Result<Self::Texture, BackendError>;

    /// Texture size in pixels.
    fn texture_size(&self, texture: &Self::Texture) -> (u32, u32);

    /// Tints subsequent blits from `texture` (colour and alpha modulation).
    fn set_texture_colour(&mut self, texture: &mut Self::Texture, colour: Colour);

    fn fill_rect(&mut self, target: &mut Self::Surface, rect: Rect, colour: Colour);

    fn blit(&mut self, target: &mut Self::Surface, texture: &Self::Texture, src: Rect, dst: Rect);

    /// Copies the composed surface to the window and shows it.
    fn present(&mut self, frame: &Self::Surface) -> Result<(), BackendError>;

    /// Milliseconds since the backend started.
    fn ticks(&self) -> u64;

    fn delay(&mut self, ms: u64);
}
