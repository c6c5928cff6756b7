//! Tile canvas (workspace facade crate).
//!
//! This package exposes `tile_canvas::{core,term,types}` while the
//! implementation lives in dedicated crates under `crates/`.

pub use tile_canvas_core as core;
pub use tile_canvas_term as term;
pub use tile_canvas_types as types;
