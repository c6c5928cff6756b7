//! Shared value types - geometry, colours and reserved glyph ids
//!
//! Everything in this crate is plain data with no I/O, usable from the canvas
//! core, from backends, and from application code that computes positions.
//!
//! # Atlas Layout
//!
//! Glyphs and text characters are addressed by integer ids into atlas textures:
//!
//! | Atlas | Columns | Tile width | Id → tile |
//! |-------|---------|------------|-----------|
//! | Glyph | 16 | full tile | `(id % 16, id / 16)` |
//! | Font | 32 | half tile | `(id % 32, id / 32)` |
//!
//! Ids follow code page 437, so the border glyphs in [`glyph`] match the
//! usual box-drawing positions.
//!
//! # Colours
//!
//! Colours are packed 32-bit ARGB values (`0xAARRGGBB`). See [`Colour`].
//!
//! # Examples
//!
//! ```
//! use tile_canvas_types::{Colour, Coord, Vec2};
//!
//! let c = Colour::rgb(10, 20, 30).with_alpha(128);
//! assert_eq!(c.channels(), (10, 20, 30, 128));
//!
//! let p = Coord::new(3, 4);
//! assert_eq!(p.mag(), 5);
//!
//! let v = Vec2::new(1.0, 1.0).to_polar().to_rect();
//! assert!((v.x - 1.0).abs() < 1e-9);
//! ```

pub mod colour;
pub mod geometry;
pub mod glyph;

pub use colour::Colour;
pub use geometry::{check_bounds, draw_circle, Coord, Rect, Vec2, Vec2Polar};

/// Number of glyph columns in a glyph atlas.
pub const GLYPH_ATLAS_COLUMNS: u32 = 16;

/// Number of character columns in a text font atlas.
pub const FONT_ATLAS_COLUMNS: u32 = 32;
