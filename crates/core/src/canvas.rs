//! The canvas: the full cell grid, its z-gated mutation API, and the frame
//! pass that flushes dirty cells to the backend.

use std::fmt::Write as _;
use std::path::Path;

use arrayvec::ArrayString;
use tracing::{debug, error, info, trace};

use tile_canvas_types::{
    check_bounds, glyph, Colour, Rect, FONT_ATLAS_COLUMNS, GLYPH_ATLAS_COLUMNS,
};

use crate::backend::Backend;
use crate::cell::{Cell, Content};
use crate::config::CanvasConfig;
use crate::error::CanvasError;
use crate::limiter::FrameLimiter;

/// Z used by the FPS overlay.
pub const FPS_Z: i32 = 10;

/// The FPS overlay is refreshed every this many frames.
const FPS_REFRESH_FRAMES: u64 = 30;

/// Size of one full glyph tile in backend pixels. Text characters use half
/// the width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderColours {
    pub focused: Colour,
    pub unfocused: Colour,
}

/// Backend work done by one [`Canvas::render`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub cells_drawn: usize,
    pub fills: usize,
    pub blits: usize,
}

/// A fixed-size grid of [`Cell`]s drawn through a [`Backend`].
///
/// Every write taking a `z` goes through the z-gate: it applies only when `z`
/// is at least the target cell's current z. Equal z overwrites, so among
/// writers on the same layer the last write wins. Writes outside the grid are
/// ignored.
pub struct Canvas<B: Backend> {
    backend: B,
    width: i32,
    height: i32,
    tile: TileSize,
    cells: Vec<Cell>,
    glyphs: B::Texture,
    font: B::Texture,
    buffer: B::Surface,
    force_redraw: bool,
    limiter: FrameLimiter,
    show_fps: bool,
    show_changes: bool,
    borders: BorderColours,
    glyph_tint: Option<Colour>,
    font_tint: Option<Colour>,
}

impl<B: Backend> Canvas<B> {
    /// Loads the atlases, opens the window and allocates the offscreen buffer.
    ///
    /// Any failure is returned immediately; no canvas exists until setup
    /// succeeds.
    pub fn setup(mut backend: B, config: &CanvasConfig) -> Result<Self, CanvasError> {
        config.validate()?;
        let (width, height) = (u32::from(config.width), u32::from(config.height));

        let (glyphs, font, tile) =
            load_atlases(&mut backend, &config.glyph_atlas, &config.font_atlas)?;

        backend
            .open_window(&config.title, width * tile.width, height * tile.height)
            .map_err(|e| {
                error!(error = %e, "failed to create window");
                CanvasError::Window(e)
            })?;

        let buffer = match create_buffer(&mut backend, width, height, tile) {
            Ok(buffer) => buffer,
            Err(e) => {
                let _ = backend.close_window();
                return Err(e);
            }
        };

        info!(
            width,
            height,
            tile_w = tile.width,
            tile_h = tile.height,
            "canvas ready"
        );

        Ok(Self {
            backend,
            width: i32::from(config.width),
            height: i32::from(config.height),
            tile,
            cells: vec![Cell::default(); (width * height) as usize],
            glyphs,
            font,
            buffer,
            force_redraw: true,
            limiter: FrameLimiter::new(config.framerate),
            show_fps: false,
            show_changes: false,
            borders: BorderColours {
                focused: config.border_focused,
                unfocused: config.border_unfocused,
            },
            glyph_tint: None,
            font_tint: None,
        })
    }

    /// Swaps both atlases.
    ///
    /// If the new glyph atlas has a different tile size the window is resized
    /// and the offscreen buffer re-created. On any failure the canvas keeps
    /// its current atlases, tile size, window size and content.
    pub fn change_fonts(&mut self, glyph_path: &Path, font_path: &Path) -> Result<(), CanvasError> {
        let (glyphs, font, tile) = load_atlases(&mut self.backend, glyph_path, font_path)?;

        let buffer = if tile != self.tile {
            let (w, h) = (self.width as u32, self.height as u32);
            self.backend
                .resize_window(w * tile.width, h * tile.height)
                .map_err(|e| {
                    error!(error = %e, "failed to resize window");
                    CanvasError::Window(e)
                })?;
            match create_buffer(&mut self.backend, w, h, tile) {
                Ok(buffer) => Some(buffer),
                Err(e) => {
                    let (old_w, old_h) = (w * self.tile.width, h * self.tile.height);
                    if let Err(undo) = self.backend.resize_window(old_w, old_h) {
                        error!(error = %undo, "failed to restore window size");
                    }
                    return Err(e);
                }
            }
        } else {
            None
        };

        self.glyphs = glyphs;
        self.font = font;
        self.glyph_tint = None;
        self.font_tint = None;
        if let Some(buffer) = buffer {
            self.buffer = buffer;
            self.tile = tile;
            debug!(tile_w = tile.width, tile_h = tile.height, "resized window");
        }
        info!(
            glyphs = %glyph_path.display(),
            font = %font_path.display(),
            "loaded fonts"
        );

        self.clear(None);
        self.force_redraw = true;
        Ok(())
    }

    /// Closes the window and hands the backend back.
    pub fn shutdown(mut self) -> Result<B, CanvasError> {
        self.backend.close_window().map_err(CanvasError::Window)?;
        Ok(self.backend)
    }

    /// Canvas size in cells.
    pub fn dims(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn tile_size(&self) -> TileSize {
        self.tile
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn dirty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_dirty()).count()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn frame_count(&self) -> u64 {
        self.limiter.frames()
    }

    pub fn border_colours(&self) -> BorderColours {
        self.borders
    }

    pub fn set_border_colours(&mut self, borders: BorderColours) {
        self.borders = borders;
    }

    pub fn set_framerate(&mut self, fps: u32) {
        self.limiter.set_framerate(fps);
    }

    pub fn toggle_fps(&mut self) {
        self.show_fps = !self.show_fps;
    }

    /// Debug aid: redrawn cells get a background that changes every frame.
    pub fn toggle_changes(&mut self) {
        self.show_changes = !self.show_changes;
    }

    /// Redraws every cell on the next frame, dirty or not.
    pub fn force_redraw(&mut self) {
        self.force_redraw = true;
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !check_bounds(x, y, self.width, self.height) {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    /// The cell at `(x, y)` if it exists and a write at `z` passes the gate.
    #[inline]
    fn gated(&mut self, x: i32, y: i32, z: i32) -> Option<&mut Cell> {
        let i = self.index(x, y)?;
        let cell = &mut self.cells[i];
        (cell.z() <= z).then_some(cell)
    }

    /// Changes the glyph at `(x, y)`, keeping colours and z.
    pub fn change_glyph(&mut self, x: i32, y: i32, glyph: u32) {
        if let Some(i) = self.index(x, y) {
            let cell = &mut self.cells[i];
            cell.set_glyph(glyph, cell.fore(), cell.back(), cell.z());
        }
    }

    /// Changes both characters of a text cell, keeping colours.
    pub fn change_text(&mut self, x: i32, y: i32, z: i32, left: u32, right: u32) {
        if let Some(cell) = self.gated(x, y, z) {
            cell.set_text(left, right, cell.fore(), cell.back(), z);
        }
    }

    /// Changes one character of a text cell. `side` is taken mod 2 (0 = left).
    pub fn change_char(&mut self, x: i32, y: i32, z: i32, ch: u32, side: usize) {
        if let Some(cell) = self.gated(x, y, z) {
            cell.set_char(ch, side, z);
        }
    }

    pub fn change_fore_colour(&mut self, x: i32, y: i32, z: i32, fore: Colour) {
        if let Some(cell) = self.gated(x, y, z) {
            cell.set_colours(fore, cell.back(), z);
        }
    }

    pub fn change_back_colour(&mut self, x: i32, y: i32, z: i32, back: Colour) {
        if let Some(cell) = self.gated(x, y, z) {
            cell.set_colours(cell.fore(), back, z);
        }
    }

    pub fn change_colours(&mut self, x: i32, y: i32, z: i32, fore: Colour, back: Colour) {
        if let Some(cell) = self.gated(x, y, z) {
            cell.set_colours(fore, back, z);
        }
    }

    /// Sets every attribute of a glyph cell.
    pub fn change_cell(&mut self, x: i32, y: i32, z: i32, glyph: u32, fore: Colour, back: Colour) {
        if let Some(cell) = self.gated(x, y, z) {
            cell.set_glyph(glyph, fore, back, z);
        }
    }

    /// Sets every attribute of a text cell.
    #[allow(clippy::too_many_arguments)]
    pub fn change_text_cell(
        &mut self,
        x: i32,
        y: i32,
        z: i32,
        left: u32,
        right: u32,
        fore: Colour,
        back: Colour,
    ) {
        if let Some(cell) = self.gated(x, y, z) {
            cell.set_text(left, right, fore, back, z);
        }
    }

    /// Writes `text` two characters per cell starting at `(x, y)`.
    ///
    /// With an odd number of characters the right half of the last cell is
    /// blanked.
    pub fn draw_text(&mut self, x: i32, y: i32, z: i32, text: &str, fore: Colour, back: Colour) {
        let mut chars = text.chars();
        let mut cx = x;
        while let Some(left) = chars.next() {
            let right = chars.next().map_or(glyph::TEXT_SPACE, u32::from);
            self.change_text_cell(cx, y, z, u32::from(left), right, fore, back);
            cx += 1;
        }
    }

    /// Draws a frame one cell outside the `w` x `h` box at `(x, y)`, with an
    /// optional title centred on the top edge.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_border(
        &mut self,
        x: i32,
        y: i32,
        z: i32,
        w: i32,
        h: i32,
        title: &str,
        focused: bool,
    ) {
        let bc = if focused {
            self.borders.focused
        } else {
            self.borders.unfocused
        };
        let back = Colour::BLACK;

        for i in 0..w {
            self.change_cell(x + i, y - 1, z, glyph::BORDER_LR, bc, back);
            self.change_cell(x + i, y + h, z, glyph::BORDER_LR, bc, back);
        }
        for i in 0..h {
            self.change_cell(x - 1, y + i, z, glyph::BORDER_UD, bc, back);
            self.change_cell(x + w, y + i, z, glyph::BORDER_UD, bc, back);
        }
        self.change_cell(x - 1, y - 1, z, glyph::BORDER_DR, bc, back);
        self.change_cell(x - 1, y + h, z, glyph::BORDER_UR, bc, back);
        self.change_cell(x + w, y + h, z, glyph::BORDER_UL, bc, back);
        self.change_cell(x + w, y - 1, z, glyph::BORDER_DL, bc, back);

        let len = title.chars().count() as i32;
        if len > 0 && len < w {
            let cells = (len + 1) / 2;
            self.draw_text(x + (w - cells) / 2, y - 1, z, title, Colour::WHITE, back);
        }
    }

    /// Resets cells to blank: the whole canvas, or only `region`.
    pub fn clear(&mut self, region: Option<Rect>) {
        let r = region.unwrap_or(Rect::new(0, 0, self.width, self.height));
        let (x0, y0) = (r.x.max(0), r.y.max(0));
        let x1 = r.x.saturating_add(r.w.max(0)).min(self.width);
        let y1 = r.y.saturating_add(r.h.max(0)).min(self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                let i = (y * self.width + x) as usize;
                self.cells[i].clear();
            }
        }
    }

    /// Flushes dirty cells to the offscreen buffer, presents it, then sleeps
    /// off whatever remains of the frame budget.
    pub fn render(&mut self) -> Result<FrameStats, CanvasError> {
        let frames = self.limiter.frames();
        if self.show_fps && frames % FPS_REFRESH_FRAMES == 0 {
            let ticks = self.backend.ticks().max(1);
            let mut text = ArrayString::<24>::new();
            let _ = write!(text, "{} fps", frames * 1000 / ticks);
            self.draw_text(0, 0, FPS_Z, &text, Colour::WHITE, Colour::BLACK);
        }

        let highlight = self.show_changes.then(|| change_highlight(frames));
        let stats = self.flush_cells(highlight);

        if let Err(e) = self.backend.present(&self.buffer) {
            error!(error = %e, "failed to present frame");
            self.force_redraw = true;
            return Err(CanvasError::Present(e));
        }
        self.force_redraw = false;

        let wait = self.limiter.shortfall(self.backend.ticks());
        if wait > 0 {
            self.backend.delay(wait);
        }
        self.limiter.finish_frame(self.backend.ticks());

        trace!(
            frame = frames,
            cells = stats.cells_drawn,
            blits = stats.blits,
            wait_ms = wait,
            "frame"
        );
        Ok(stats)
    }

    fn flush_cells(&mut self, highlight: Option<Colour>) -> FrameStats {
        let Self {
            backend,
            width,
            tile,
            cells,
            glyphs,
            font,
            buffer,
            force_redraw,
            glyph_tint,
            font_tint,
            ..
        } = self;

        let (tw, th) = (tile.width as i32, tile.height as i32);
        let half = tw / 2;
        let mut stats = FrameStats::default();

        for (i, cell) in cells.iter_mut().enumerate() {
            if !(cell.is_dirty() || *force_redraw) {
                continue;
            }
            let px = (i as i32 % *width) * tw;
            let py = (i as i32 / *width) * th;
            let back = highlight.unwrap_or(cell.back());

            match cell.content() {
                Content::Glyph(g) => {
                    let dst = Rect::new(px, py, tw, th);
                    backend.fill_rect(buffer, dst, back);
                    stats.fills += 1;
                    if !glyph::is_blank_glyph(g) {
                        let src = atlas_src(g, GLYPH_ATLAS_COLUMNS, tw, th);
                        tint(backend, glyphs, glyph_tint, cell.fore());
                        backend.blit(buffer, glyphs, src, dst);
                        stats.blits += 1;
                    }
                }
                Content::Text(chars) => {
                    for (side, c) in chars.into_iter().enumerate() {
                        let dst = Rect::new(px + side as i32 * half, py, half, th);
                        backend.fill_rect(buffer, dst, back);
                        stats.fills += 1;
                        if !glyph::is_blank_char(c) {
                            let src = atlas_src(c, FONT_ATLAS_COLUMNS, half, th);
                            tint(backend, font, font_tint, cell.fore());
                            backend.blit(buffer, font, src, dst);
                            stats.blits += 1;
                        }
                    }
                }
            }

            cell.mark_clean();
            stats.cells_drawn += 1;
        }

        stats
    }
}

/// Source rect of tile `id` in an atlas `columns` tiles wide.
fn atlas_src(id: u32, columns: u32, tw: i32, th: i32) -> Rect {
    let col = (id % columns) as i32;
    let row = (id / columns) as i32;
    Rect::new(col * tw, row * th, tw, th)
}

/// Sets the atlas colour mod only when it differs from the last one used.
fn tint<B: Backend>(backend: &mut B, tex: &mut B::Texture, last: &mut Option<Colour>, fore: Colour) {
    if *last != Some(fore) {
        backend.set_texture_colour(tex, fore);
        *last = Some(fore);
    }
}

fn change_highlight(frames: u64) -> Colour {
    let channel = |offset: u64| (((frames + offset) * 10) % 255) as u8;
    Colour::rgb(channel(0), channel(100), channel(200))
}

fn load_atlas<B: Backend>(backend: &mut B, path: &Path) -> Result<B::Texture, CanvasError> {
    backend.load_texture(path).map_err(|e| {
        error!(path = %path.display(), error = %e, "could not load atlas");
        CanvasError::Texture {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

fn load_atlases<B: Backend>(
    backend: &mut B,
    glyph_path: &Path,
    font_path: &Path,
) -> Result<(B::Texture, B::Texture, TileSize), CanvasError> {
    let glyphs = load_atlas(backend, glyph_path)?;
    let font = load_atlas(backend, font_path)?;

    let (gw, gh) = backend.texture_size(&glyphs);
    let tile = TileSize {
        width: gw / GLYPH_ATLAS_COLUMNS,
        height: gh / GLYPH_ATLAS_COLUMNS,
    };
    if tile.width < 2 || tile.height == 0 {
        error!(path = %glyph_path.display(), gw, gh, "glyph atlas too small");
        return Err(CanvasError::InvalidAtlas {
            path: glyph_path.to_path_buf(),
            width: gw,
            height: gh,
        });
    }
    Ok((glyphs, font, tile))
}

fn create_buffer<B: Backend>(
    backend: &mut B,
    width: u32,
    height: u32,
    tile: TileSize,
) -> Result<B::Surface, CanvasError> {
    backend
        .create_surface(width * tile.width, height * tile.height)
        .map_err(|e| {
            error!(error = %e, "failed to create buffer surface");
            CanvasError::Buffer(e)
        })
}
