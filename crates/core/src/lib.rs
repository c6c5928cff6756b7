//! Canvas core - cells, change tracking, z-gated writes and frame composition
//!
//! This crate owns the retained cell grid and decides *what* gets redrawn each
//! frame. It has no window system or terminal code of its own; drawing goes
//! through the [`Backend`] trait, which keeps the core:
//!
//! - **Testable**: [`HeadlessBackend`] records every draw call with a simulated clock
//! - **Portable**: the same canvas drives a terminal, a GPU window, or nothing at all
//! - **Cheap per frame**: only cells whose visible state changed reach the backend
//!
//! # Module Structure
//!
//! - [`cell`]: the atomic drawable unit, glyph or two-character text
//! - [`canvas`]: the shared grid, its z-gated mutators and the render pass
//! - [`view`]: overlay sub-grids composited through the same write path
//! - [`backend`]: the graphics collaborator contract
//! - [`limiter`]: frame-rate cap
//! - [`config`]: setup configuration (JSON / environment)
//!
//! # Z-Gate
//!
//! A write to a cell at priority `z` applies only if `z >= cell.z()`. Strictly
//! lower writes are dropped, so once a higher layer claims a cell nothing below
//! it can clobber it until the cell is cleared.
//!
//! # Example
//!
//! ```
//! use tile_canvas_core::{Canvas, CanvasConfig, HeadlessBackend, View};
//! use tile_canvas_core::types::Colour;
//!
//! let config = CanvasConfig { width: 10, height: 10, ..CanvasConfig::default() };
//! let mut canvas = Canvas::setup(HeadlessBackend::new(), &config).unwrap();
//!
//! canvas.change_cell(2, 2, 0, 'A' as u32, Colour::WHITE, Colour::BLACK);
//! let stats = canvas.render().unwrap();
//! assert_eq!(stats.blits, 1);
//!
//! let mut overlay = View::new(3, 3, 1, 1, 1, false);
//! overlay.draw(1, 1, '@' as u32, Colour::WHITE, Colour::BLACK);
//! overlay.render(&mut canvas, None);
//! assert_eq!(canvas.cell(2, 2).unwrap().glyph(), Some('@' as u32));
//! ```

pub mod backend;
pub mod canvas;
pub mod cell;
pub mod config;
pub mod error;
pub mod headless;
pub mod limiter;
pub mod view;

pub use tile_canvas_types as types;

pub use backend::Backend;
pub use canvas::{BorderColours, Canvas, FrameStats, TileSize, FPS_Z};
pub use cell::{Cell, Content};
pub use config::CanvasConfig;
pub use error::{BackendError, CanvasError};
pub use headless::{DrawOp, HeadlessBackend, HeadlessSurface, HeadlessTexture};
pub use limiter::FrameLimiter;
pub use view::{Offset, View};
