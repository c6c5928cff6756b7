//! Integer and float 2D vectors, rectangles and circle rasterization.

use std::ops::{Add, Sub};

/// Returns true if `(x, y)` lies inside a `w` x `h` grid anchored at the origin.
#[inline(always)]
pub fn check_bounds(x: i32, y: i32, w: i32, h: i32) -> bool {
    x >= 0 && y >= 0 && x < w && y < h
}

/// An `(x, y)` spot on an integer grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn get(self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Euclidean length, truncated toward zero.
    pub fn mag(self) -> i32 {
        self.to_vec2().mag() as i32
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x as f64, self.y as f64)
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord {
    type Output = Coord;

    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A 2D float vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn set(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn get(self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Components rounded to the nearest integer, halves away from zero.
    pub fn get_int(self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }

    pub fn mod_by(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    pub fn mag(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn to_polar(self) -> Vec2Polar {
        Vec2Polar::new(self.mag(), self.y.atan2(self.x))
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A 2D vector in polar form: magnitude `r` and angle `phi` (radians).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2Polar {
    pub r: f64,
    pub phi: f64,
}

impl Vec2Polar {
    pub const fn new(r: f64, phi: f64) -> Self {
        Self { r, phi }
    }

    pub fn set(&mut self, r: f64, phi: f64) {
        self.r = r;
        self.phi = phi;
    }

    pub fn get(self) -> (f64, f64) {
        (self.r, self.phi)
    }

    pub fn to_rect(self) -> Vec2 {
        Vec2::new(self.r * self.phi.cos(), self.r * self.phi.sin())
    }
}

/// Sums in rectangular form, then converts back.
impl Add for Vec2Polar {
    type Output = Vec2Polar;

    fn add(self, rhs: Vec2Polar) -> Vec2Polar {
        (self.to_rect() + rhs.to_rect()).to_polar()
    }
}

/// Axis-aligned rectangle: offset plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        check_bounds(x - self.x, y - self.y, self.w, self.h)
    }
}

/// Rasterizes the outline of a circle with the midpoint algorithm, calling
/// `plot` once per boundary point (octant seams may repeat a point).
pub fn draw_circle(center: Coord, r: i32, mut plot: impl FnMut(i32, i32)) {
    if r < 0 {
        return;
    }
    if r == 0 {
        plot(center.x, center.y);
        return;
    }

    let (cx, cy) = (center.x, center.y);
    let mut x = r;
    let mut y = 0;
    let mut err = 1 - r;

    while x >= y {
        plot(cx + x, cy + y);
        plot(cx + y, cy + x);
        plot(cx - y, cy + x);
        plot(cx - x, cy + y);
        plot(cx - x, cy - y);
        plot(cx - y, cy - x);
        plot(cx + y, cy - x);
        plot(cx + x, cy - y);

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}
