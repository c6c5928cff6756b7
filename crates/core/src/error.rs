//! Setup and resource errors.
//!
//! Drawing calls never fail; only operations that create or swap backend
//! resources return these.

use std::path::PathBuf;

use thiserror::Error;

/// Failure reported by a [`Backend`](crate::Backend) implementation.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bad atlas {path}: {reason}")]
    Atlas { path: PathBuf, reason: String },

    #[error("window error: {0}")]
    Window(String),

    #[error("surface error: {0}")]
    Surface(String),
}

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("failed to create window: {0}")]
    Window(#[source] BackendError),

    #[error("could not load atlas at {path}")]
    Texture {
        path: PathBuf,
        #[source]
        source: BackendError,
    },

    #[error("atlas {path} is {width}x{height}, too small for a 16x16 tile grid")]
    InvalidAtlas { path: PathBuf, width: u32, height: u32 },

    #[error("failed to create canvas buffer: {0}")]
    Buffer(#[source] BackendError),

    #[error("failed to present frame: {0}")]
    Present(#[source] BackendError),

    #[error("invalid config: {0}")]
    Config(String),
}
