//! Terminal backend.
//!
//! Implements [`tile_canvas_core::Backend`] on top of crossterm so a canvas
//! can be presented in a terminal. Backend pixels are terminal cells:
//!
//! - Surfaces are [`FrameBuffer`]s of coloured characters
//! - Textures are [`CharAtlas`]es loaded from UTF-8 text files
//! - A glyph tile is 2 columns x 1 row, a text character 1 x 1
//! - `present` diffs against the previous frame and only writes changed runs

pub mod atlas;
pub mod backend;
pub mod fb;
pub mod renderer;

pub use tile_canvas_core as core;
pub use tile_canvas_core::types;

pub use atlas::{extend_right, CharAtlas, ATLAS_WIDTH_PX};
pub use backend::TerminalBackend;
pub use fb::{Cell, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into};
