//! Views: independently owned sub-grids composited onto a canvas.
//!
//! A view never aliases canvas cells. Each frame [`View::render`] copies its
//! whole grid into the canvas through the ordinary z-gated writes, so an
//! overlay is just a batch of canvas writes and layers the same way any other
//! writer does. The canvas' own change detection keeps unchanged cells from
//! being redrawn.

use tile_canvas_types::{check_bounds, draw_circle, Colour, Coord};

use crate::backend::Backend;
use crate::canvas::Canvas;
use crate::cell::{Cell, Content};

/// Extra placement applied when rendering a view, e.g. by a parent container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Offset {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// A rectangular grid of glyph cells placed at `(x, y)` on layer `z`.
#[derive(Debug, Clone)]
pub struct View {
    width: i32,
    height: i32,
    x: i32,
    y: i32,
    z: i32,
    visible: bool,
    bordered: bool,
    focused: bool,
    title: String,
    cells: Vec<Cell>,
}

impl View {
    pub fn new(width: i32, height: i32, x: i32, y: i32, z: i32, bordered: bool) -> Self {
        let (width, height) = (width.max(0), height.max(0));
        Self {
            width,
            height,
            x,
            y,
            z,
            visible: true,
            bordered,
            focused: false,
            title: String::new(),
            cells: vec![Cell::default(); (width * height) as usize],
        }
    }

    pub fn dims(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn position(&self) -> Coord {
        Coord::new(self.x, self.y)
    }

    pub fn z(&self) -> i32 {
        self.z
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn toggle_visible(&mut self) {
        self.visible = !self.visible;
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn set_z(&mut self, z: i32) {
        self.z = z;
    }

    /// Local cell at `(x, y)`.
    pub fn cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        check_bounds(x, y, self.width, self.height).then(|| (y * self.width + x) as usize)
    }

    /// Draws a glyph at local `(x, y)`; positions outside the view are ignored.
    pub fn draw(&mut self, x: i32, y: i32, glyph: u32, fore: Colour, back: Colour) {
        if let Some(i) = self.index(x, y) {
            self.cells[i].set_glyph(glyph, fore, back, 0);
        }
    }

    /// Draws the outline of a circle of radius `r` centred at local `(x, y)`.
    pub fn draw_circle(&mut self, x: i32, y: i32, r: i32, glyph: u32, fore: Colour, back: Colour) {
        draw_circle(Coord::new(x, y), r, |px, py| self.draw(px, py, glyph, fore, back));
    }

    /// Blanks every local cell.
    pub fn reset(&mut self) {
        self.cells.iter_mut().for_each(Cell::clear);
    }

    /// Copies the whole grid (and border, if any) into `canvas` at the view's
    /// placement shifted by `offset`. Hidden views write nothing.
    pub fn render<B: Backend>(&self, canvas: &mut Canvas<B>, offset: Option<Offset>) {
        if !self.visible {
            return;
        }
        let off = offset.unwrap_or_default();
        let (ox, oy, z) = (self.x + off.x, self.y + off.y, self.z + off.z);

        for (i, cell) in self.cells.iter().enumerate() {
            let cx = ox + i as i32 % self.width;
            let cy = oy + i as i32 / self.width;
            match cell.content() {
                Content::Glyph(g) => canvas.change_cell(cx, cy, z, g, cell.fore(), cell.back()),
                Content::Text([l, r]) => {
                    canvas.change_text_cell(cx, cy, z, l, r, cell.fore(), cell.back())
                }
            }
        }

        if self.bordered {
            canvas.draw_border(ox, oy, z, self.width, self.height, &self.title, self.focused);
        }
    }
}
