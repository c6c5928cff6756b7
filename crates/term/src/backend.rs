//! TerminalBackend: presents composed frames to a real terminal.

use std::io::{self, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::{cursor, style::ResetColor, terminal, QueueableCommand};
use tracing::{debug, info};

use tile_canvas_core::types::{Colour, Rect};
use tile_canvas_core::{Backend, BackendError};

use crate::atlas::{extend_right, CharAtlas};
use crate::fb::FrameBuffer;
use crate::renderer::{encode_diff_into, encode_full_into};

/// Drawn when a blit source lies outside its atlas.
const MISSING_GLYPH: char = '?';

pub struct TerminalBackend {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    open: bool,
    start: Instant,
}

impl Default for TerminalBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalBackend {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
            open: false,
            start: Instant::now(),
        }
    }

    /// Force the next present to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    fn flush_buf(&mut self) -> io::Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()
    }

    fn restore(&mut self) -> io::Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()
    }
}

fn to_u16(v: u32, what: &str) -> Result<u16, BackendError> {
    u16::try_from(v).map_err(|_| BackendError::Surface(format!("{what} {v} exceeds terminal limits")))
}

impl Backend for TerminalBackend {
    type Texture = CharAtlas;
    type Surface = FrameBuffer;

    fn open_window(&mut self, title: &str, width: u32, height: u32) -> Result<(), BackendError> {
        let (cols, rows) = terminal::size()?;
        if width > u32::from(cols) || height > u32::from(rows) {
            return Err(BackendError::Window(format!(
                "canvas needs {width}x{height} columns/rows, terminal is {cols}x{rows}"
            )));
        }

        terminal::enable_raw_mode()?;
        self.open = true;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(terminal::SetTitle(title))?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.last = None;
        info!(width, height, "terminal window opened");
        Ok(())
    }

    fn resize_window(&mut self, width: u32, height: u32) -> Result<(), BackendError> {
        let (cols, rows) = terminal::size()?;
        if width > u32::from(cols) || height > u32::from(rows) {
            return Err(BackendError::Window(format!(
                "canvas needs {width}x{height} columns/rows, terminal is {cols}x{rows}"
            )));
        }
        self.last = None;
        debug!(width, height, "terminal window resized");
        Ok(())
    }

    fn close_window(&mut self) -> Result<(), BackendError> {
        if self.open {
            self.open = false;
            self.restore()?;
        }
        Ok(())
    }

    fn create_surface(&mut self, width: u32, height: u32) -> Result<FrameBuffer, BackendError> {
        Ok(FrameBuffer::new(
            to_u16(width, "surface width")?,
            to_u16(height, "surface height")?,
        ))
    }

    fn load_texture(&mut self, path: &Path) -> Result<CharAtlas, BackendError> {
        CharAtlas::load(path)
    }

    fn texture_size(&self, texture: &CharAtlas) -> (u32, u32) {
        texture.size_px()
    }

    fn set_texture_colour(&mut self, texture: &mut CharAtlas, colour: Colour) {
        texture.tint = colour.into();
    }

    fn fill_rect(&mut self, target: &mut FrameBuffer, rect: Rect, colour: Colour) {
        target.fill_rect(rect.x, rect.y, rect.w, rect.h, colour.into());
    }

    fn blit(&mut self, target: &mut FrameBuffer, texture: &CharAtlas, src: Rect, dst: Rect) {
        let ch = texture.lookup(src).unwrap_or(MISSING_GLYPH);
        let tail = extend_right(ch);
        for dx in 0..dst.w {
            if let Some(cell) = target.get_mut(dst.x + dx, dst.y) {
                cell.ch = if dx == 0 { ch } else { tail };
                cell.fg = texture.tint;
            }
        }
    }

    fn present(&mut self, frame: &FrameBuffer) -> Result<(), BackendError> {
        self.buf.clear();
        let same_size = self
            .last
            .as_ref()
            .is_some_and(|prev| prev.width() == frame.width() && prev.height() == frame.height());

        match self.last.as_ref() {
            Some(prev) if same_size => encode_diff_into(prev, frame, &mut self.buf)?,
            _ => encode_full_into(frame, &mut self.buf)?,
        }

        // The terminal state is unknown after a failed write; repaint fully next time.
        if let Err(e) = self.flush_buf() {
            self.last = None;
            return Err(e.into());
        }

        if same_size {
            if let Some(prev) = self.last.as_mut() {
                prev.copy_from(frame);
            }
        } else {
            self.last = Some(frame.clone());
        }
        Ok(())
    }

    fn ticks(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn delay(&mut self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

impl Drop for TerminalBackend {
    fn drop(&mut self) {
        if self.open {
            let _ = self.restore();
        }
    }
}
