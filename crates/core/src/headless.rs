//! Headless backend for tests, benches and CI.
//!
//! Draw calls are counted and, when recording is enabled, logged as
//! [`DrawOp`]s. The clock is simulated: `delay` advances it instead of
//! sleeping, and [`HeadlessBackend::advance`] stands in for work done between
//! frames.

use std::path::{Path, PathBuf};

use tile_canvas_types::{Colour, Rect};

use crate::backend::Backend;
use crate::error::BackendError;

/// Default atlas size: 16x16 tiles of 24px.
pub const DEFAULT_ATLAS_PX: u32 = 384;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessTexture {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub colour: Colour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessSurface {
    pub width: u32,
    pub height: u32,
}

/// A recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Fill { rect: Rect, colour: Colour },
    Blit { atlas: PathBuf, src: Rect, dst: Rect, colour: Colour },
    Present,
}

#[derive(Debug, Default)]
pub struct HeadlessBackend {
    recording: bool,
    ops: Vec<DrawOp>,
    fills: usize,
    blits: usize,
    presents: usize,
    now_ms: u64,
    delayed_ms: u64,
    window: Option<(u32, u32)>,
    title: String,
    atlas_sizes: Vec<(PathBuf, u32, u32)>,
    missing: Vec<PathBuf>,
    fail_surfaces: bool,
    fail_presents: bool,
}

impl HeadlessBackend {
    /// A backend that counts draw calls without logging them.
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that also logs every draw call.
    pub fn recording() -> Self {
        Self {
            recording: true,
            ..Self::default()
        }
    }

    /// Atlases loaded from `path` report this size instead of the default.
    pub fn with_atlas_size(mut self, path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        self.atlas_sizes.push((path.into(), width, height));
        self
    }

    /// Loading `path` fails as if the file did not exist.
    pub fn with_missing(mut self, path: impl Into<PathBuf>) -> Self {
        self.missing.push(path.into());
        self
    }

    /// Every surface creation fails.
    pub fn with_failing_surfaces(mut self) -> Self {
        self.fail_surfaces = true;
        self
    }

    /// Every present fails.
    pub fn with_failing_present(mut self) -> Self {
        self.fail_presents = true;
        self
    }

    pub fn set_missing(&mut self, path: impl Into<PathBuf>) {
        self.missing.push(path.into());
    }

    pub fn set_atlas_size(&mut self, path: impl Into<PathBuf>, width: u32, height: u32) {
        self.atlas_sizes.push((path.into(), width, height));
    }

    pub fn set_failing_surfaces(&mut self, fail: bool) {
        self.fail_surfaces = fail;
    }

    pub fn set_failing_present(&mut self, fail: bool) {
        self.fail_presents = fail;
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn fills(&self) -> usize {
        self.fills
    }

    pub fn blits(&self) -> usize {
        self.blits
    }

    pub fn presents(&self) -> usize {
        self.presents
    }

    /// Total simulated time spent in `delay`.
    pub fn delayed_ms(&self) -> u64 {
        self.delayed_ms
    }

    pub fn window(&self) -> Option<(u32, u32)> {
        self.window
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Clears the op log and counters.
    pub fn reset(&mut self) {
        self.ops.clear();
        self.fills = 0;
        self.blits = 0;
        self.presents = 0;
        self.delayed_ms = 0;
    }

    /// Moves the simulated clock forward.
    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }

    fn record(&mut self, op: DrawOp) {
        if self.recording {
            self.ops.push(op);
        }
    }
}

impl Backend for HeadlessBackend {
    type Texture = HeadlessTexture;
    type Surface = HeadlessSurface;

    fn open_window(&mut self, title: &str, width: u32, height: u32) -> Result<(), BackendError> {
        self.title = title.to_string();
        self.window = Some((width, height));
        Ok(())
    }

    fn resize_window(&mut self, width: u32, height: u32) -> Result<(), BackendError> {
        match self.window {
            Some(_) => {
                self.window = Some((width, height));
                Ok(())
            }
            None => Err(BackendError::Window("no window to resize".to_string())),
        }
    }

    fn close_window(&mut self) -> Result<(), BackendError> {
        self.window = None;
        Ok(())
    }

    fn create_surface(&mut self, width: u32, height: u32) -> Result<HeadlessSurface, BackendError> {
        if self.fail_surfaces {
            return Err(BackendError::Surface(format!(
                "cannot allocate {width}x{height} surface"
            )));
        }
        Ok(HeadlessSurface { width, height })
    }

    fn load_texture(&mut self, path: &Path) -> Result<HeadlessTexture, BackendError> {
        if self.missing.iter().any(|p| p == path) {
            return Err(BackendError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )));
        }
        let (width, height) = self
            .atlas_sizes
            .iter()
            .rev()
            .find(|(p, _, _)| p == path)
            .map(|&(_, w, h)| (w, h))
            .unwrap_or((DEFAULT_ATLAS_PX, DEFAULT_ATLAS_PX));
        Ok(HeadlessTexture {
            path: path.to_path_buf(),
            width,
            height,
            colour: Colour::WHITE,
        })
    }

    fn texture_size(&self, texture: &HeadlessTexture) -> (u32, u32) {
        (texture.width, texture.height)
    }

    fn set_texture_colour(&mut self, texture: &mut HeadlessTexture, colour: Colour) {
        texture.colour = colour;
    }

    fn fill_rect(&mut self, _target: &mut HeadlessSurface, rect: Rect, colour: Colour) {
        self.fills += 1;
        self.record(DrawOp::Fill { rect, colour });
    }

    fn blit(&mut self, _target: &mut HeadlessSurface, texture: &HeadlessTexture, src: Rect, dst: Rect) {
        self.blits += 1;
        if self.recording {
            self.ops.push(DrawOp::Blit {
                atlas: texture.path.clone(),
                src,
                dst,
                colour: texture.colour,
            });
        }
    }

    fn present(&mut self, _frame: &HeadlessSurface) -> Result<(), BackendError> {
        if self.fail_presents {
            return Err(BackendError::Window("present failed".to_string()));
        }
        self.presents += 1;
        self.record(DrawOp::Present);
        Ok(())
    }

    fn ticks(&self) -> u64 {
        self.now_ms
    }

    fn delay(&mut self, ms: u64) {
        self.now_ms += ms;
        self.delayed_ms += ms;
    }
}
