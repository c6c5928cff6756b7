//! Framebuffer of terminal cells: the terminal backend's surface type.

use tile_canvas_core::types::Colour;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Alpha is dropped; a terminal cell is either painted or not.
impl From<Colour> for Rgb {
    fn from(c: Colour) -> Self {
        Rgb::new(c.r(), c.g(), c.b())
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
        }
    }
}

/// 2D framebuffer of coloured character cells. One cell is one backend pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the framebuffer.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        self.idx(x, y).map(move |i| &mut self.cells[i])
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Paints the background of every cell in the rect and blanks its character.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, bg: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                if let Some(cell) = self.get_mut(x + dx, y + dy) {
                    cell.ch = ' ';
                    cell.bg = bg;
                }
            }
        }
    }

    /// Copies `src` into this buffer at the origin, clipped to both sizes.
    pub fn copy_from(&mut self, src: &FrameBuffer) {
        if self.width == src.width && self.height == src.height {
            self.cells.copy_from_slice(&src.cells);
            return;
        }
        let w = self.width.min(src.width) as usize;
        for y in 0..self.height.min(src.height) as usize {
            let s = y * src.width as usize;
            let d = y * self.width as usize;
            self.cells[d..d + w].copy_from_slice(&src.cells[s..s + w]);
        }
    }
}
